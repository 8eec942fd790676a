//! Billing configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TILLPOINT_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite://tillpoint.db`)
//! - `TILLPOINT_MAX_CONNECTIONS` - Pool size (default: 5)

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://tillpoint.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was present but unusable.
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Billing application configuration.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// `SQLite` connection string.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl BillingConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("TILLPOINT_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let max_connections = match std::env::var("TILLPOINT_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("TILLPOINT_MAX_CONNECTIONS".to_owned(), format!("{e}"))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
