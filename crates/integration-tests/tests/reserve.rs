//! Reservation behavior: stock checks, snapshots, and cart assembly.

use rust_decimal::Decimal;

use tillpoint_billing::CheckoutError;
use tillpoint_core::{BillId, BillStatus, Price};
use tillpoint_integration_tests::TestContext;

#[tokio::test]
async fn reserve_decrements_stock_and_snapshots_the_line() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    let line = ctx
        .checkout
        .reserve(BillId::new(4217), "Raymond", 5)
        .await
        .expect("reservation should succeed");

    assert_eq!(line.product_name, "Raymond");
    assert_eq!(line.quantity, 5);
    assert_eq!(line.unit_price, Price::from_cents(120_000));
    assert_eq!(line.unit_price.amount(), Decimal::new(120_000, 2));
    assert_eq!(line.category, "Clothes");
    assert_eq!(line.sub_category, "Pants");

    assert_eq!(ctx.stock_of("Raymond").await, 45);

    let view = ctx
        .checkout
        .cart_view(BillId::new(4217))
        .await
        .expect("cart view");
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.grand_total, Price::from_cents(600_000));
}

#[tokio::test]
async fn reserve_rejects_nonpositive_quantities() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    for quantity in [0, -3] {
        let err = ctx
            .checkout
            .reserve(BillId::new(4217), "Raymond", quantity)
            .await
            .expect_err("nonpositive quantity must be rejected");
        assert!(matches!(err, CheckoutError::InvalidQuantity(q) if q == quantity));
    }

    assert_eq!(ctx.stock_of("Raymond").await, 50);
}

#[tokio::test]
async fn reserve_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    let err = ctx
        .checkout
        .reserve(BillId::new(4217), "No Such Brand", 1)
        .await
        .expect_err("unknown product must be rejected");
    assert!(matches!(err, CheckoutError::ProductNotFound(name) if name == "No Such Brand"));
}

#[tokio::test]
async fn insufficient_stock_reports_available_and_leaves_state_unchanged() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    let err = ctx
        .checkout
        .reserve(BillId::new(4217), "Raymond", 51)
        .await
        .expect_err("oversized reservation must be rejected");
    assert!(matches!(err, CheckoutError::InsufficientStock { available: 50 }));

    // Neither the stock nor the cart moved.
    assert_eq!(ctx.stock_of("Raymond").await, 50);
    let view = ctx
        .checkout
        .cart_view(BillId::new(4217))
        .await
        .expect("cart view");
    assert!(view.lines.is_empty());
}

#[tokio::test]
async fn repeated_reserve_appends_a_second_line() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    // Intentionally not idempotent: the same arguments twice mean two lines
    // and a double decrement.
    for _ in 0..2 {
        ctx.checkout
            .reserve(BillId::new(4217), "Raymond", 5)
            .await
            .expect("reservation should succeed");
    }

    assert_eq!(ctx.stock_of("Raymond").await, 40);

    let view = ctx
        .checkout
        .cart_view(BillId::new(4217))
        .await
        .expect("cart view");
    assert_eq!(view.lines.len(), 2);
    assert_eq!(view.grand_total, Price::from_cents(1_200_000));
    // Insertion order is preserved.
    assert!(view.lines[0].id.as_i64() < view.lines[1].id.as_i64());
}

#[tokio::test]
async fn reserve_on_a_paid_bill_fails_closed_and_does_not_touch_stock() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    ctx.checkout
        .reserve(BillId::new(4217), "Raymond", 5)
        .await
        .expect("reservation should succeed");
    ctx.checkout
        .finalize(BillId::new(4217))
        .await
        .expect("finalize should succeed");

    let err = ctx
        .checkout
        .reserve(BillId::new(4217), "Raymond", 1)
        .await
        .expect_err("paid bill must not accept reservations");
    assert!(matches!(err, CheckoutError::BillClosed(bill) if bill.as_i64() == 4217));

    assert_eq!(ctx.stock_of("Raymond").await, 45);
}

#[tokio::test]
async fn status_moves_from_open_to_cart_building() {
    let ctx = TestContext::new().await;
    ctx.register(4217).await;

    assert_eq!(
        ctx.checkout.bill_status(BillId::new(4217)).await.expect("status"),
        BillStatus::Open
    );

    ctx.checkout
        .reserve(BillId::new(4217), "Zara", 2)
        .await
        .expect("reservation should succeed");

    assert_eq!(
        ctx.checkout.bill_status(BillId::new(4217)).await.expect("status"),
        BillStatus::CartBuilding
    );
}
