//! Startup profile repository

use crate::domain::entities::Startup;
use sqlx::SqlitePool;
use uuid::Uuid;
use venturesroom_common::Result;

/// All columns in the startups table, used for SELECT and RETURNING clauses.
pub(crate) const STARTUP_COLUMNS: &str = "\
    id, owner_id, name, sector, stage, description, website, \
    is_approved, created_at, updated_at";

#[derive(Clone)]
pub struct StartupRepository {
    pool: SqlitePool,
}

impl StartupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an approved startup by ID (public view)
    pub async fn find_approved(&self, id: Uuid) -> Result<Option<Startup>> {
        let query =
            format!("SELECT {STARTUP_COLUMNS} FROM startups WHERE id = ? AND is_approved = 1");
        let startup = sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(startup)
    }

    /// Find the startup owned by a user
    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Startup>> {
        let query = format!("SELECT {STARTUP_COLUMNS} FROM startups WHERE owner_id = ?");
        let startup = sqlx::query_as::<_, Startup>(&query)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(startup)
    }

    /// List approved startups, optionally filtered by sector
    pub async fn list_approved(
        &self,
        sector: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Startup>> {
        let query = format!(
            "SELECT {STARTUP_COLUMNS} FROM startups \
             WHERE is_approved = 1 AND (?1 IS NULL OR sector = ?1) \
             ORDER BY name ASC LIMIT ?2 OFFSET ?3"
        );
        let startups = sqlx::query_as::<_, Startup>(&query)
            .bind(sector)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(startups)
    }

    /// Persist editable profile fields
    pub async fn update_profile(&self, startup: &Startup) -> Result<Option<Startup>> {
        let query = format!(
            "UPDATE startups SET name = ?, sector = ?, stage = ?, description = ?, \
             website = ?, updated_at = ? \
             WHERE id = ? RETURNING {STARTUP_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Startup>(&query)
            .bind(&startup.name)
            .bind(&startup.sector)
            .bind(&startup.stage)
            .bind(&startup.description)
            .bind(&startup.website)
            .bind(startup.updated_at)
            .bind(startup.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }
}
