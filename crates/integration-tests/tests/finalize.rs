//! Finalization behavior: totals, the one-shot transition, and history.

use tillpoint_billing::CheckoutError;
use tillpoint_core::{BillId, BillStatus, Price};
use tillpoint_integration_tests::TestContext;

#[tokio::test]
async fn finalize_totals_snapshotted_lines_and_purges_the_cart() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    // 5 x 1200.00 + 2 x 800.00 = 7600.00
    ctx.checkout
        .reserve(BillId::new(4217), "Raymond", 5)
        .await
        .expect("reservation should succeed");
    ctx.checkout
        .reserve(BillId::new(4217), "Van Heusen", 2)
        .await
        .expect("reservation should succeed");

    let receipt = ctx
        .checkout
        .finalize(BillId::new(4217))
        .await
        .expect("finalize should succeed");

    assert_eq!(receipt.total, Price::from_cents(760_000));
    assert_eq!(receipt.lines.len(), 2);

    // The cart is gone; the paid bill is the authoritative record.
    let view = ctx
        .checkout
        .cart_view(BillId::new(4217))
        .await
        .expect("cart view");
    assert!(view.lines.is_empty());

    let record = ctx
        .checkout
        .find_paid_bill(BillId::new(4217))
        .await
        .expect("paid bill should be found");
    assert_eq!(record.total_amount, Price::from_cents(760_000));
    assert_eq!(record.customer.bill_id, BillId::new(4217));

    assert_eq!(
        ctx.checkout.bill_status(BillId::new(4217)).await.expect("status"),
        BillStatus::Paid
    );

    // Exactly one payment row backs the bill.
    let paid = ctx
        .checkout
        .ledger()
        .paid_bill(BillId::new(4217))
        .await
        .expect("paid bill query")
        .expect("payment row should exist");
    assert_eq!(paid.bill_id, BillId::new(4217));
    assert_eq!(paid.total_amount, Price::from_cents(760_000));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM paid_bills WHERE bill_no = ?")
        .bind(4217_i64)
        .fetch_one(&ctx.pool)
        .await
        .expect("count query");
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn finalize_twice_fails_cleanly_without_double_charging() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    ctx.checkout
        .reserve(BillId::new(4217), "Raymond", 5)
        .await
        .expect("reservation should succeed");
    ctx.checkout
        .finalize(BillId::new(4217))
        .await
        .expect("first finalize should succeed");

    let err = ctx
        .checkout
        .finalize(BillId::new(4217))
        .await
        .expect_err("second finalize must fail");
    assert!(matches!(err, CheckoutError::DuplicatePayment(bill) if bill.as_i64() == 4217));

    // The recorded total is untouched.
    let record = ctx
        .checkout
        .find_paid_bill(BillId::new(4217))
        .await
        .expect("paid bill should be found");
    assert_eq!(record.total_amount, Price::from_cents(600_000));
}

#[tokio::test]
async fn finalize_with_empty_cart_is_reported_not_fatal() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    let err = ctx
        .checkout
        .finalize(BillId::new(4217))
        .await
        .expect_err("empty bill must be rejected");
    assert!(matches!(err, CheckoutError::EmptyBill(bill) if bill.as_i64() == 4217));

    // The bill stays open for further reservations.
    assert_eq!(
        ctx.checkout.bill_status(BillId::new(4217)).await.expect("status"),
        BillStatus::Open
    );
}

#[tokio::test]
async fn finalize_requires_a_registered_customer() {
    let ctx = TestContext::new().await;

    // Cart lines can accumulate against an unregistered bill number, but
    // payment needs a customer row to reference.
    ctx.checkout
        .reserve(BillId::new(9999), "Raymond", 1)
        .await
        .expect("reservation should succeed");

    let err = ctx
        .checkout
        .finalize(BillId::new(9999))
        .await
        .expect_err("unregistered bill must not finalize");
    assert!(matches!(err, CheckoutError::BillNotFound(bill) if bill.as_i64() == 9999));
}

#[tokio::test]
async fn find_paid_bill_misses_are_not_found() {
    let ctx = TestContext::new().await;

    let err = ctx
        .checkout
        .find_paid_bill(BillId::new(1234))
        .await
        .expect_err("unknown bill must not be found");
    assert!(matches!(err, CheckoutError::BillNotFound(bill) if bill.as_i64() == 1234));
}
