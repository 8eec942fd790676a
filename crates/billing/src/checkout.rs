//! The checkout transaction core.
//!
//! [`Checkout`] orchestrates reservations and finalization against the
//! catalog and ledger stores. Every multi-write operation runs inside a
//! single database transaction: a reservation's cart-line insert commits
//! together with its stock decrement, and a finalization's paid-bill insert
//! commits together with its cart purge. Partial state is never visible.
//!
//! Distinct bills proceed in parallel; the only contended rows are the
//! product rows a reservation decrements, and those are guarded by the
//! conditional update in [`crate::db::catalog`].

use sqlx::SqlitePool;
use tracing::{info, instrument};

use tillpoint_core::{BillId, BillStatus};

use crate::db::{CatalogStore, LedgerStore, catalog, ledger};
use crate::error::CheckoutError;
use crate::models::{CartLine, CartView, Customer, NewCustomer, PaidBillRecord, Receipt};

/// The transaction core for the billing workflow.
///
/// Cheap to clone; wraps the shared connection pool.
#[derive(Debug, Clone)]
pub struct Checkout {
    pool: SqlitePool,
}

impl Checkout {
    /// Create a checkout core over a connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The catalog store, for taxonomy browsing and product lookups.
    #[must_use]
    pub const fn catalog(&self) -> CatalogStore<'_> {
        CatalogStore::new(&self.pool)
    }

    /// The ledger store, for cart and history reads.
    #[must_use]
    pub const fn ledger(&self) -> LedgerStore<'_> {
        LedgerStore::new(&self.pool)
    }

    /// Register a customer against a candidate bill number.
    ///
    /// A registration whose mobile OR email matches any existing customer is
    /// rejected, never merged. A taken bill number is reported separately so
    /// the session layer can regenerate and retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::DuplicateCustomer`] on a mobile or email match
    /// - [`CheckoutError::BillNumberInUse`] when the bill number is taken
    /// - [`CheckoutError::StoreUnavailable`] on store failure
    #[instrument(skip(self, new_customer), fields(bill = %new_customer.bill_id))]
    pub async fn register_customer(
        &self,
        new_customer: &NewCustomer,
    ) -> Result<Customer, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        if ledger::contact_in_use(&mut *tx, &new_customer.mobile, &new_customer.email).await? {
            return Err(CheckoutError::DuplicateCustomer);
        }
        if ledger::customer_for_bill_in(&mut *tx, new_customer.bill_id)
            .await?
            .is_some()
        {
            return Err(CheckoutError::BillNumberInUse(new_customer.bill_id));
        }

        let customer = ledger::insert_customer(&mut *tx, new_customer).await?;
        tx.commit().await?;

        info!(customer = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Reserve a quantity of a product into a bill's cart.
    ///
    /// Appends a cart line with the price and taxonomy snapshotted at this
    /// instant and decrements catalog stock by the same amount, atomically.
    /// Deliberately not idempotent: calling twice with identical arguments
    /// appends two lines and decrements stock twice.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidQuantity`] if `quantity <= 0`
    /// - [`CheckoutError::BillClosed`] if the bill is already paid
    /// - [`CheckoutError::ProductNotFound`] on a catalog miss
    /// - [`CheckoutError::InsufficientStock`] when stock cannot cover the
    ///   request; carries how many units remain
    /// - [`CheckoutError::StoreUnavailable`] on store failure
    #[instrument(skip(self), fields(bill = %bill_id, product = %product_name, quantity))]
    pub async fn reserve(
        &self,
        bill_id: BillId,
        product_name: &str,
        quantity: i64,
    ) -> Result<CartLine, CheckoutError> {
        if quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity(quantity));
        }

        let mut tx = self.pool.begin().await?;

        if ledger::paid_bill_exists(&mut *tx, bill_id).await? {
            return Err(CheckoutError::BillClosed(bill_id));
        }

        let product = catalog::lookup_in(&mut *tx, product_name)
            .await?
            .ok_or_else(|| CheckoutError::ProductNotFound(product_name.to_owned()))?;

        // The conditional update is the sufficiency check; a rejected
        // decrement rolls the whole reservation back.
        if !catalog::decrement_stock(&mut *tx, product_name, quantity).await? {
            return Err(CheckoutError::InsufficientStock {
                available: product.available_quantity,
            });
        }

        let line = ledger::append_cart_line(&mut *tx, bill_id, &product, quantity).await?;
        tx.commit().await?;

        info!(line = %line.id, "reserved into cart");
        Ok(line)
    }

    /// The bill's cart as rendered: lines in insertion order plus the grand
    /// total over snapshotted prices.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StoreUnavailable`] on store failure.
    #[instrument(skip(self), fields(bill = %bill_id))]
    pub async fn cart_view(&self, bill_id: BillId) -> Result<CartView, CheckoutError> {
        let lines = self.ledger().cart_lines_for(bill_id).await?;
        let grand_total = lines.iter().map(CartLine::line_total).sum();

        Ok(CartView {
            bill_id,
            lines,
            grand_total,
        })
    }

    /// Finalize a bill: record the payment and clear the cart, atomically.
    ///
    /// The total is the sum of each line's snapshotted price times quantity;
    /// current catalog prices are never re-read. Stock consumed by the
    /// bill's reservations is consumed permanently. One-shot: a second call
    /// for the same bill always fails cleanly.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::DuplicatePayment`] if the bill is already paid
    /// - [`CheckoutError::BillNotFound`] when no customer owns the bill
    /// - [`CheckoutError::EmptyBill`] when the cart has no lines
    /// - [`CheckoutError::StoreUnavailable`] on store failure
    #[instrument(skip(self), fields(bill = %bill_id))]
    pub async fn finalize(&self, bill_id: BillId) -> Result<Receipt, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        if ledger::paid_bill_exists(&mut *tx, bill_id).await? {
            return Err(CheckoutError::DuplicatePayment(bill_id));
        }
        if ledger::customer_for_bill_in(&mut *tx, bill_id).await?.is_none() {
            return Err(CheckoutError::BillNotFound(bill_id));
        }

        let lines = ledger::cart_lines_in(&mut *tx, bill_id).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyBill(bill_id));
        }

        let total = lines.iter().map(CartLine::line_total).sum();
        let paid_at = chrono::Utc::now();

        ledger::insert_paid_bill(&mut *tx, bill_id, total, paid_at).await?;
        ledger::delete_cart_lines(&mut *tx, bill_id).await?;
        tx.commit().await?;

        info!(%total, "bill finalized");
        Ok(Receipt {
            bill_id,
            lines,
            total,
            paid_at,
        })
    }

    /// Look up a finalized bill together with its customer.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::BillNotFound`] when no paid bill exists
    /// - [`CheckoutError::StoreUnavailable`] on store failure
    #[instrument(skip(self), fields(bill = %bill_id))]
    pub async fn find_paid_bill(&self, bill_id: BillId) -> Result<PaidBillRecord, CheckoutError> {
        self.ledger()
            .find_paid_bill(bill_id)
            .await?
            .ok_or(CheckoutError::BillNotFound(bill_id))
    }

    /// The bill's current lifecycle state, derived from store contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::StoreUnavailable`] on store failure.
    #[instrument(skip(self), fields(bill = %bill_id))]
    pub async fn bill_status(&self, bill_id: BillId) -> Result<BillStatus, CheckoutError> {
        let mut conn = self.pool.acquire().await?;

        if ledger::paid_bill_exists(&mut *conn, bill_id).await? {
            return Ok(BillStatus::Paid);
        }
        if ledger::cart_line_count(&mut *conn, bill_id).await? > 0 {
            return Ok(BillStatus::CartBuilding);
        }
        Ok(BillStatus::Open)
    }
}
