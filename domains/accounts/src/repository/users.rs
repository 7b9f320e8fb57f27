//! User repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use venturesroom_auth::Role;
use venturesroom_common::{RepositoryError, Result};

use crate::domain::entities::{User, UserStats};

/// All columns in the users table, used for SELECT and RETURNING clauses.
pub(crate) const USER_COLUMNS: &str = "\
    id, email, password_hash, full_name, role, is_approved, created_at, updated_at";

/// Raw users row; `role` is stored as text
#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: Option<String>,
    role: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> std::result::Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| {
            RepositoryError::InvalidData(format!("user {}: {e}", row.id))
        })?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role,
            is_approved: row.is_approved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(crate) fn into_user(row: Option<UserRow>) -> Result<Option<User>> {
    Ok(row.map(User::try_from).transpose()?)
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>> {
    rows.into_iter()
        .map(|row| User::try_from(row).map_err(Into::into))
        .collect()
}

/// Filters for the admin user listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_approved: Option<bool>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        into_user(row)
    }

    /// Find user by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        into_user(row)
    }

    /// List users, newest first
    pub async fn list(&self, filter: UserFilter, limit: i64, offset: i64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE (?1 IS NULL OR role = ?1) AND (?2 IS NULL OR is_approved = ?2) \
             ORDER BY created_at DESC LIMIT ?3 OFFSET ?4"
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(filter.role.map(|role| role.as_str()))
            .bind(filter.is_approved)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        into_users(rows)
    }

    /// Startups and structures waiting for a decision, oldest first
    pub async fn list_pending(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE is_approved = 0 AND role IN ('startup', 'structure') \
             ORDER BY created_at ASC LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        into_users(rows)
    }

    /// Update the display name
    pub async fn update_full_name(
        &self,
        user_id: Uuid,
        full_name: Option<String>,
    ) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET full_name = ?, updated_at = ? \
             WHERE id = ? RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(full_name)
            .bind(Utc::now())
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        into_user(row)
    }

    /// Account counts per role
    pub async fn stats(&self) -> Result<UserStats> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COALESCE(SUM(role = 'client'), 0) AS clients,
                   COALESCE(SUM(role = 'startup'), 0) AS startups,
                   COALESCE(SUM(role = 'structure'), 0) AS structures,
                   COALESCE(SUM(role = 'admin'), 0) AS admins,
                   COALESCE(SUM(is_approved = 0 AND role IN ('startup', 'structure')), 0) AS pending
            FROM users
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
