//! Customer registration and duplicate rejection.

use tillpoint_billing::CheckoutError;
use tillpoint_billing::models::NewCustomer;
use tillpoint_core::{BillId, Email, Mobile};
use tillpoint_integration_tests::TestContext;

fn new_customer(name: &str, mobile: &str, email: &str, bill: i64) -> NewCustomer {
    NewCustomer {
        name: name.to_owned(),
        mobile: Mobile::parse(mobile).expect("valid mobile"),
        email: Email::parse(email).expect("valid email"),
        bill_id: BillId::new(bill),
    }
}

#[tokio::test]
async fn registration_succeeds_for_a_new_customer() {
    let ctx = TestContext::new().await;

    let customer = ctx
        .checkout
        .register_customer(&new_customer("Asha Rao", "+919876543210", "asha@example.com", 4217))
        .await
        .expect("registration should succeed");

    assert_eq!(customer.name, "Asha Rao");
    assert_eq!(customer.bill_id, BillId::new(4217));
}

#[tokio::test]
async fn duplicate_mobile_is_rejected_even_with_a_different_email() {
    let ctx = TestContext::new().await;

    ctx.checkout
        .register_customer(&new_customer("Asha Rao", "+919876543210", "asha@example.com", 4217))
        .await
        .expect("first registration should succeed");

    let err = ctx
        .checkout
        .register_customer(&new_customer("A. Rao", "+919876543210", "other@example.com", 5000))
        .await
        .expect_err("same mobile must be rejected");
    assert!(matches!(err, CheckoutError::DuplicateCustomer));
}

#[tokio::test]
async fn duplicate_email_is_rejected_even_with_a_different_mobile() {
    let ctx = TestContext::new().await;

    ctx.checkout
        .register_customer(&new_customer("Asha Rao", "+919876543210", "asha@example.com", 4217))
        .await
        .expect("first registration should succeed");

    let err = ctx
        .checkout
        .register_customer(&new_customer("A. Rao", "+918765432109", "asha@example.com", 5000))
        .await
        .expect_err("same email must be rejected");
    assert!(matches!(err, CheckoutError::DuplicateCustomer));
}

#[tokio::test]
async fn bill_number_collisions_are_reported_for_regeneration() {
    let ctx = TestContext::new().await;

    ctx.checkout
        .register_customer(&new_customer("Asha Rao", "+919876543210", "asha@example.com", 4217))
        .await
        .expect("first registration should succeed");

    let err = ctx
        .checkout
        .register_customer(&new_customer("Vikram Shah", "+918765432109", "vikram@example.com", 4217))
        .await
        .expect_err("taken bill number must be rejected");
    assert!(matches!(err, CheckoutError::BillNumberInUse(bill) if bill.as_i64() == 4217));
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let ctx = TestContext::new().await;

    // TestContext already seeded once; a second pass inserts nothing.
    let inserted = ctx
        .checkout
        .catalog()
        .seed_defaults()
        .await
        .expect("second seed should succeed");
    assert_eq!(inserted, 0);
}

#[tokio::test]
async fn taxonomy_queries_reflect_store_contents() {
    let ctx = TestContext::new().await;
    let catalog = ctx.checkout.catalog();

    let categories = catalog.categories().await.expect("categories");
    assert_eq!(categories, ["Clothes", "Electronics", "Food"]);

    let subs = catalog.sub_categories("Clothes").await.expect("sub-categories");
    assert_eq!(subs, ["Pants", "Shirt", "T-Shirt"]);

    let pants = catalog.products_in("Clothes", "Pants").await.expect("products");
    let names: Vec<_> = pants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Denim", "Peter England", "Raymond"]);

    // Selections are validated by what the store contains, nothing else.
    assert!(catalog.products_in("Clothes", "Hats").await.expect("products").is_empty());
}
