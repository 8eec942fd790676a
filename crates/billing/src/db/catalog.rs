//! Catalog store: product lookups, taxonomy queries, and stock decrement.

use sqlx::{SqliteConnection, SqlitePool};

use tillpoint_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::Product;

/// The stock catalog used when seeding an empty store:
/// `(category, sub_category, name, unit_price_cents, quantity)`.
const DEFAULT_CATALOG: &[(&str, &str, &str, i64, i64)] = &[
    ("Clothes", "Pants", "Raymond", 120_000, 50),
    ("Clothes", "Pants", "Peter England", 100_000, 30),
    ("Clothes", "Pants", "Denim", 150_000, 20),
    ("Clothes", "Shirt", "Park Avenue", 110_000, 40),
    ("Clothes", "Shirt", "Louis Philippe", 130_000, 25),
    ("Clothes", "Shirt", "Allen Solly", 125_000, 35),
    ("Clothes", "T-Shirt", "Van Heusen", 80_000, 60),
    ("Clothes", "T-Shirt", "Zara", 90_000, 50),
    ("Clothes", "T-Shirt", "Levi's", 100_000, 40),
    ("Electronics", "T.V.", "Panasonic", 3_500_000, 15),
    ("Electronics", "T.V.", "LG OLED", 4_000_000, 10),
    ("Electronics", "T.V.", "Samsung Crystal", 4_500_000, 8),
    ("Electronics", "Microwave", "Godrej", 800_000, 20),
    ("Electronics", "Microwave", "LG Solo", 1_000_000, 15),
    ("Electronics", "Microwave", "Samsung Convection", 1_200_000, 12),
    ("Electronics", "Refrigerator", "Samsung Frost Free", 2_500_000, 10),
    ("Electronics", "Refrigerator", "Whirlpool", 3_000_000, 12),
    ("Electronics", "Refrigerator", "Voltas", 2_800_000, 14),
    ("Electronics", "Washing Machine", "Haier", 2_000_000, 10),
    ("Electronics", "Washing Machine", "Bosch", 2_500_000, 8),
    ("Electronics", "Washing Machine", "IFB", 2_300_000, 7),
    ("Food", "Burger", "McDonald", 15_000, 100),
    ("Food", "Burger", "Burger King", 18_000, 80),
    ("Food", "Burger", "Burger Singh", 20_000, 50),
    ("Food", "Pizza", "Domino's", 40_000, 60),
    ("Food", "Pizza", "Pizza Hut", 45_000, 50),
    ("Food", "Pizza", "Insta Pizza", 42_000, 40),
    ("Food", "Fries", "KFC", 12_000, 100),
    ("Food", "Fries", "McCain", 13_000, 90),
];

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    category: String,
    sub_category: String,
    product_name: String,
    unit_price_cents: i64,
    quantity: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            category: row.category,
            sub_category: row.sub_category,
            name: row.product_name,
            unit_price: Price::from_cents(row.unit_price_cents),
            available_quantity: row.quantity,
        }
    }
}

const SELECT_PRODUCT: &str = r"
SELECT id, category, sub_category, product_name, unit_price_cents, quantity
FROM products
WHERE product_name = ?
";

/// Store for product catalog reads.
pub struct CatalogStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CatalogStore<'a> {
    /// Create a new catalog store.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up a product by its catalog-unique name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lookup(&self, product_name: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(SELECT_PRODUCT)
            .bind(product_name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// All categories present in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products ORDER BY category",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Sub-categories present under a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sub_categories(&self, category: &str) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT sub_category FROM products
            WHERE category = ?
            ORDER BY sub_category
            ",
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Products available under a category / sub-category pair.
    ///
    /// What the catalog actually contains is the only taxonomy there is;
    /// selections are validated by existence here, not against a separate
    /// hardcoded list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn products_in(
        &self,
        category: &str,
        sub_category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, category, sub_category, product_name, unit_price_cents, quantity
            FROM products
            WHERE category = ? AND sub_category = ?
            ORDER BY product_name
            ",
        )
        .bind(category)
        .bind(sub_category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Seed the default catalog if the products table is empty.
    ///
    /// Returns the number of products inserted (zero when the catalog was
    /// already populated).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction fails.
    pub async fn seed_defaults(&self) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        for (category, sub_category, name, unit_price_cents, quantity) in DEFAULT_CATALOG {
            sqlx::query(
                r"
                INSERT INTO products (category, sub_category, product_name, unit_price_cents, quantity)
                VALUES (?, ?, ?, ?, ?)
                ",
            )
            .bind(category)
            .bind(sub_category)
            .bind(name)
            .bind(unit_price_cents)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(DEFAULT_CATALOG.len() as u64)
    }
}

/// Look up a product inside an open transaction.
pub(crate) async fn lookup_in(
    conn: &mut SqliteConnection,
    product_name: &str,
) -> Result<Option<Product>, RepositoryError> {
    let row = sqlx::query_as::<_, ProductRow>(SELECT_PRODUCT)
        .bind(product_name)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(Into::into))
}

/// Conditionally decrement stock inside an open transaction.
///
/// The `quantity >= ?` guard is the sufficiency check itself: the update
/// applies only if enough stock remains at the moment of the write, so two
/// racing reservations can never jointly oversell a product. Returns `false`
/// when the guard rejected the decrement.
pub(crate) async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_name: &str,
    amount: i64,
) -> Result<bool, RepositoryError> {
    let result = sqlx::query(
        r"
        UPDATE products
        SET quantity = quantity - ?1
        WHERE product_name = ?2 AND quantity >= ?1
        ",
    )
    .bind(amount)
    .bind(product_name)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
