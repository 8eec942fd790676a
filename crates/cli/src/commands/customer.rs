//! Customer registration.

use rand::Rng;
use tracing::{info, warn};

use tillpoint_billing::CheckoutError;
use tillpoint_billing::models::NewCustomer;
use tillpoint_core::{BillId, Email, Mobile};

/// How many bill-number collisions to tolerate before giving up.
const MAX_BILL_NUMBER_ATTEMPTS: u32 = 10;

/// Generate a candidate bill number for a new session.
fn generate_bill_number() -> BillId {
    BillId::new(rand::rng().random_range(1000..10_000))
}

/// Register a customer with a freshly generated bill number, regenerating
/// on collision.
///
/// # Errors
///
/// Returns an error if the inputs fail validation, the customer is already
/// registered, or the store fails.
pub async fn register(
    name: &str,
    mobile: &str,
    email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mobile = Mobile::parse(mobile)?;
    let email = Email::parse(email)?;
    let checkout = super::open_checkout().await?;

    for _ in 0..MAX_BILL_NUMBER_ATTEMPTS {
        let new_customer = NewCustomer {
            name: name.to_owned(),
            mobile: mobile.clone(),
            email: email.clone(),
            bill_id: generate_bill_number(),
        };

        match checkout.register_customer(&new_customer).await {
            Ok(customer) => {
                info!(customer = %customer.id, "Sign up successful");
                println!("Registered {}. Your bill number: {}", customer.name, customer.bill_id);
                return Ok(());
            }
            Err(CheckoutError::BillNumberInUse(taken)) => {
                warn!(bill = %taken, "Bill number already in use; regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err("could not find a free bill number; try again".into())
}
