//! Ledger store: customers, cart lines, and paid bills.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use tillpoint_core::{BillId, CartLineId, CustomerId, Email, Mobile, PaidBillId, Price};

use super::RepositoryError;
use crate::models::{CartLine, Customer, NewCustomer, PaidBill, PaidBillRecord, Product};

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    mobile: String,
    email: String,
    bill_no: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, RepositoryError> {
        let mobile = Mobile::parse(&row.mobile).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid mobile in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            name: row.name,
            mobile,
            email,
            bill_id: BillId::new(row.bill_no),
            created_at: row.created_at,
        })
    }
}

/// Internal row type for cart line queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i64,
    bill_no: i64,
    category: String,
    sub_category: String,
    product_name: String,
    unit_price_cents: i64,
    quantity: i64,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: CartLineId::new(row.id),
            bill_id: BillId::new(row.bill_no),
            category: row.category,
            sub_category: row.sub_category,
            product_name: row.product_name,
            unit_price: Price::from_cents(row.unit_price_cents),
            quantity: row.quantity,
        }
    }
}

const SELECT_CART_LINES: &str = r"
SELECT id, bill_no, category, sub_category, product_name, unit_price_cents, quantity
FROM cart
WHERE bill_no = ?
ORDER BY id
";

/// Store for ledger reads: customers and paid-bill history.
pub struct LedgerStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LedgerStore<'a> {
    /// Create a new ledger store.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Cart lines for a bill, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn cart_lines_for(&self, bill_id: BillId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(SELECT_CART_LINES)
            .bind(bill_id.as_i64())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The customer that owns a bill number, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact details
    /// fail to parse.
    pub async fn customer_for_bill(
        &self,
        bill_id: BillId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, name, mobile, email, bill_no, created_at
            FROM customers
            WHERE bill_no = ?
            ",
        )
        .bind(bill_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// The payment record for a bill, if one has been finalized.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn paid_bill(&self, bill_id: BillId) -> Result<Option<PaidBill>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct PaidBillRow {
            id: i64,
            bill_no: i64,
            total_amount_cents: i64,
            paid_on: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, PaidBillRow>(
            r"
            SELECT id, bill_no, total_amount_cents, paid_on
            FROM paid_bills
            WHERE bill_no = ?
            ",
        )
        .bind(bill_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| PaidBill {
            id: PaidBillId::new(r.id),
            bill_id: BillId::new(r.bill_no),
            total_amount: Price::from_cents(r.total_amount_cents),
            paid_on: r.paid_on,
        }))
    }

    /// Look up a finalized bill together with its customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored contact details
    /// fail to parse.
    pub async fn find_paid_bill(
        &self,
        bill_id: BillId,
    ) -> Result<Option<PaidBillRecord>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct JoinedRow {
            id: i64,
            name: String,
            mobile: String,
            email: String,
            bill_no: i64,
            created_at: DateTime<Utc>,
            total_amount_cents: i64,
            paid_on: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, JoinedRow>(
            r"
            SELECT c.id, c.name, c.mobile, c.email, c.bill_no, c.created_at,
                   p.total_amount_cents, p.paid_on
            FROM customers c
            INNER JOIN paid_bills p ON p.bill_no = c.bill_no
            WHERE p.bill_no = ?
            ",
        )
        .bind(bill_id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| {
            let customer = Customer::try_from(CustomerRow {
                id: r.id,
                name: r.name,
                mobile: r.mobile,
                email: r.email,
                bill_no: r.bill_no,
                created_at: r.created_at,
            })?;
            Ok(PaidBillRecord {
                customer,
                total_amount: Price::from_cents(r.total_amount_cents),
                paid_on: r.paid_on,
            })
        })
        .transpose()
    }
}

/// Whether a paid bill already exists for a bill number.
pub(crate) async fn paid_bill_exists(
    conn: &mut SqliteConnection,
    bill_id: BillId,
) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM paid_bills WHERE bill_no = ?)",
    )
    .bind(bill_id.as_i64())
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// Whether a mobile number or email is already registered.
pub(crate) async fn contact_in_use(
    conn: &mut SqliteConnection,
    mobile: &Mobile,
    email: &Email,
) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM customers WHERE mobile = ? OR email = ?)",
    )
    .bind(mobile.as_str())
    .bind(email.as_str())
    .fetch_one(conn)
    .await?;

    Ok(exists)
}

/// The customer owning a bill number, inside an open transaction.
pub(crate) async fn customer_for_bill_in(
    conn: &mut SqliteConnection,
    bill_id: BillId,
) -> Result<Option<Customer>, RepositoryError> {
    let row = sqlx::query_as::<_, CustomerRow>(
        r"
        SELECT id, name, mobile, email, bill_no, created_at
        FROM customers
        WHERE bill_no = ?
        ",
    )
    .bind(bill_id.as_i64())
    .fetch_optional(conn)
    .await?;

    row.map(Customer::try_from).transpose()
}

/// Insert a customer row.
///
/// The unique constraints on mobile, email, and bill number are the final
/// authority; a violation surfaces as `Conflict`.
pub(crate) async fn insert_customer(
    conn: &mut SqliteConnection,
    new_customer: &NewCustomer,
) -> Result<Customer, RepositoryError> {
    let created_at = Utc::now();
    let result = sqlx::query(
        r"
        INSERT INTO customers (name, mobile, email, bill_no, created_at)
        VALUES (?, ?, ?, ?, ?)
        ",
    )
    .bind(&new_customer.name)
    .bind(new_customer.mobile.as_str())
    .bind(new_customer.email.as_str())
    .bind(new_customer.bill_id.as_i64())
    .bind(created_at)
    .execute(conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(db_err.message().to_owned());
        }
        RepositoryError::Database(e)
    })?;

    Ok(Customer {
        id: CustomerId::new(result.last_insert_rowid()),
        name: new_customer.name.clone(),
        mobile: new_customer.mobile.clone(),
        email: new_customer.email.clone(),
        bill_id: new_customer.bill_id,
        created_at,
    })
}

/// Cart lines for a bill inside an open transaction, in insertion order.
pub(crate) async fn cart_lines_in(
    conn: &mut SqliteConnection,
    bill_id: BillId,
) -> Result<Vec<CartLine>, RepositoryError> {
    let rows = sqlx::query_as::<_, CartLineRow>(SELECT_CART_LINES)
        .bind(bill_id.as_i64())
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Append a cart line snapshotting the product's current price and taxonomy.
pub(crate) async fn append_cart_line(
    conn: &mut SqliteConnection,
    bill_id: BillId,
    product: &Product,
    quantity: i64,
) -> Result<CartLine, RepositoryError> {
    let result = sqlx::query(
        r"
        INSERT INTO cart (bill_no, category, sub_category, product_name, unit_price_cents, quantity)
        VALUES (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(bill_id.as_i64())
    .bind(&product.category)
    .bind(&product.sub_category)
    .bind(&product.name)
    .bind(product.unit_price.as_cents())
    .bind(quantity)
    .execute(conn)
    .await?;

    Ok(CartLine {
        id: CartLineId::new(result.last_insert_rowid()),
        bill_id,
        category: product.category.clone(),
        sub_category: product.sub_category.clone(),
        product_name: product.name.clone(),
        unit_price: product.unit_price,
        quantity,
    })
}

/// Delete every cart line for a bill. Returns the number of lines removed.
pub(crate) async fn delete_cart_lines(
    conn: &mut SqliteConnection,
    bill_id: BillId,
) -> Result<u64, RepositoryError> {
    let result = sqlx::query("DELETE FROM cart WHERE bill_no = ?")
        .bind(bill_id.as_i64())
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Record the paid bill for a bill number.
///
/// The UNIQUE constraint enforces one payment per bill and the foreign key
/// requires a registered customer; either violation surfaces as `Conflict`.
pub(crate) async fn insert_paid_bill(
    conn: &mut SqliteConnection,
    bill_id: BillId,
    total: Price,
    paid_on: DateTime<Utc>,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO paid_bills (bill_no, total_amount_cents, paid_on)
        VALUES (?, ?, ?)
        ",
    )
    .bind(bill_id.as_i64())
    .bind(total.as_cents())
    .bind(paid_on)
    .execute(conn)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e
            && (db_err.is_unique_violation() || db_err.is_foreign_key_violation())
        {
            return RepositoryError::Conflict(db_err.message().to_owned());
        }
        RepositoryError::Database(e)
    })?;

    Ok(())
}

/// Number of cart lines currently held for a bill.
pub(crate) async fn cart_line_count(
    conn: &mut SqliteConnection,
    bill_id: BillId,
) -> Result<i64, RepositoryError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart WHERE bill_no = ?")
        .bind(bill_id.as_i64())
        .fetch_one(conn)
        .await?;

    Ok(count)
}
