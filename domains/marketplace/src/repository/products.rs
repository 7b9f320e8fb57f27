//! Product repository

use crate::domain::entities::Product;
use sqlx::SqlitePool;
use uuid::Uuid;
use venturesroom_common::Result;

/// All columns in the products table, used for SELECT and RETURNING clauses.
const PRODUCT_COLUMNS: &str = "\
    id, startup_id, name, description, price_cents, is_active, created_at, updated_at";

/// Same columns, qualified for queries joining `startups s`
const PRODUCT_COLUMNS_QUALIFIED: &str = "\
    p.id, p.startup_id, p.name, p.description, p.price_cents, p.is_active, \
    p.created_at, p.updated_at";

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find product by ID regardless of visibility
    pub async fn find(&self, id: Uuid) -> Result<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Find an active product of an approved startup
    pub async fn find_visible(&self, id: Uuid) -> Result<Option<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS_QUALIFIED} FROM products p \
             JOIN startups s ON s.id = p.startup_id \
             WHERE p.id = ? AND p.is_active = 1 AND s.is_approved = 1"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// List active products of approved startups, optionally for one startup
    pub async fn list_visible(
        &self,
        startup_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS_QUALIFIED} FROM products p \
             JOIN startups s ON s.id = p.startup_id \
             WHERE p.is_active = 1 AND s.is_approved = 1 \
               AND (?1 IS NULL OR p.startup_id = ?1) \
             ORDER BY p.created_at DESC LIMIT ?2 OFFSET ?3"
        );
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(startup_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Create a new product
    pub async fn create(&self, product: &Product) -> Result<Product> {
        let query = format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Product>(&query)
            .bind(product.id)
            .bind(product.startup_id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(product.is_active)
            .bind(product.created_at)
            .bind(product.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Persist editable product fields
    pub async fn update(&self, product: &Product) -> Result<Option<Product>> {
        let query = format!(
            "UPDATE products SET name = ?, description = ?, price_cents = ?, \
             is_active = ?, updated_at = ? \
             WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Product>(&query)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(product.is_active)
            .bind(product.updated_at)
            .bind(product.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Withdraw a product from sale. Orders keep referencing it.
    pub async fn archive(&self, id: Uuid) -> Result<bool> {
        let result =
            sqlx::query("UPDATE products SET is_active = 0, updated_at = ? WHERE id = ?")
                .bind(chrono::Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
