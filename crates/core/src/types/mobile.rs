//! Mobile number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Mobile`] number.
#[derive(thiserror::Error, Debug, Clone)]
pub enum MobileError {
    /// The input string is empty.
    #[error("mobile number cannot be empty")]
    Empty,
    /// The number of digits is outside the allowed range.
    #[error("mobile number must have between {min} and {max} digits")]
    BadLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
    /// The input contains a character that is not a digit.
    #[error("mobile number may only contain digits after an optional leading +")]
    InvalidCharacter,
}

/// A mobile phone number.
///
/// Digits only, optionally prefixed with `+`. Like [`super::Email`], the
/// number doubles as an identity key for customer registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Mobile(String);

impl Mobile {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits (ITU-T E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `Mobile` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains anything other than
    /// digits (after an optional leading `+`), or has a digit count outside
    /// 8-15.
    pub fn parse(s: &str) -> Result<Self, MobileError> {
        if s.is_empty() {
            return Err(MobileError::Empty);
        }

        let digits = s.strip_prefix('+').unwrap_or(s);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MobileError::InvalidCharacter);
        }

        if digits.len() < Self::MIN_DIGITS || digits.len() > Self::MAX_DIGITS {
            return Err(MobileError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the mobile number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Mobile` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Mobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Mobile {
    type Err = MobileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(Mobile::parse("9876543210").is_ok());
        assert!(Mobile::parse("+919876543210").is_ok());
        assert!(Mobile::parse("12345678").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Mobile::parse(""), Err(MobileError::Empty)));
        assert!(matches!(
            Mobile::parse("+"),
            Err(MobileError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_parse_bad_length() {
        assert!(matches!(
            Mobile::parse("1234567"),
            Err(MobileError::BadLength { .. })
        ));
        assert!(matches!(
            Mobile::parse("1234567890123456"),
            Err(MobileError::BadLength { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert!(matches!(
            Mobile::parse("98765-43210"),
            Err(MobileError::InvalidCharacter)
        ));
        assert!(matches!(
            Mobile::parse("98765o3210"),
            Err(MobileError::InvalidCharacter)
        ));
    }
}
