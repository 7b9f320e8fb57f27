//! Order repository

use crate::domain::entities::{CommissionSummary, Order};
use sqlx::SqlitePool;
use uuid::Uuid;
use venturesroom_common::Result;

/// All columns in the orders table, used for SELECT and RETURNING clauses.
const ORDER_COLUMNS: &str = "\
    id, client_id, product_id, startup_id, quantity, \
    unit_price_cents, total_cents, commission_cents, status, \
    created_at, updated_at";

/// Which orders a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    Client(Uuid),
    Startup(Uuid),
    All,
}

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find order by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Order>> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// List orders within a visibility scope, newest first
    pub async fn list(&self, scope: OrderScope, limit: i64, offset: i64) -> Result<Vec<Order>> {
        let (filter, owner) = match scope {
            OrderScope::Client(id) => ("WHERE client_id = ?1", Some(id)),
            OrderScope::Startup(id) => ("WHERE startup_id = ?1", Some(id)),
            OrderScope::All => ("WHERE ?1 IS NULL", None),
        };
        let query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders {filter} \
             ORDER BY created_at DESC LIMIT ?2 OFFSET ?3"
        );
        let orders = sqlx::query_as::<_, Order>(&query)
            .bind(owner)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    /// Create a new order
    pub async fn create(&self, order: &Order) -> Result<Order> {
        let query = format!(
            "INSERT INTO orders ({ORDER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ORDER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Order>(&query)
            .bind(order.id)
            .bind(order.client_id)
            .bind(order.product_id)
            .bind(order.startup_id)
            .bind(order.quantity)
            .bind(order.unit_price_cents)
            .bind(order.total_cents)
            .bind(order.commission_cents)
            .bind(order.status)
            .bind(order.created_at)
            .bind(order.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Persist a status change
    pub async fn update_status(&self, order: &Order) -> Result<Option<Order>> {
        let query = format!(
            "UPDATE orders SET status = ?, updated_at = ? \
             WHERE id = ? RETURNING {ORDER_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Order>(&query)
            .bind(order.status)
            .bind(order.updated_at)
            .bind(order.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Gross and commission totals per startup, cancelled orders excluded
    pub async fn commission_summary(&self) -> Result<Vec<CommissionSummary>> {
        let summaries = sqlx::query_as::<_, CommissionSummary>(
            r#"
            SELECT s.id AS startup_id,
                   s.name AS startup_name,
                   COUNT(o.id) AS order_count,
                   COALESCE(SUM(o.total_cents), 0) AS gross_cents,
                   COALESCE(SUM(o.commission_cents), 0) AS commission_cents
            FROM orders o
            JOIN startups s ON s.id = o.startup_id
            WHERE o.status != 'cancelled'
            GROUP BY s.id, s.name
            ORDER BY commission_cents DESC, s.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }
}
