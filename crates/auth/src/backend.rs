//! Concrete authentication backend
//!
//! Wraps `SqlitePool` + `AuthConfig` and owns the auth-specific read of the
//! `users` table. Uses runtime `sqlx::query_as` against a lightweight row.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::TokenIssuer;
use crate::types::{AuthIdentity, Role};

/// Row type for identity lookup (role stored as text)
#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    full_name: Option<String>,
    role: String,
    is_approved: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: SqlitePool,
    config: AuthConfig,
    tokens: TokenIssuer,
}

impl AuthBackend {
    pub fn new(pool: SqlitePool, config: AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&config);
        Self {
            pool,
            config,
            tokens,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find user identity by ID (read model, lightweight subset of User)
    pub async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let row: Option<IdentityRow> = sqlx::query_as(
            r#"
            SELECT id, email, full_name, role, is_approved,
                   created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role: Role = row.role.parse().map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Corrupt role in users table");
            AuthError::UserLoadError
        })?;

        Ok(Some(AuthIdentity {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            role,
            is_approved: row.is_approved,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    /// Verify a token and load the account it refers to.
    ///
    /// The attached identity always comes from the store. A token whose role
    /// no longer matches the stored role was issued before a role change and
    /// is refused.
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self.tokens.verify(token)?;

        let user = self.find_identity(claims.user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %claims.user_id, "Token refers to a missing user");
            AuthError::UserNotFound
        })?;

        if user.role != claims.role {
            tracing::warn!(
                user_id = %user.id,
                token_role = %claims.role,
                current_role = %user.role,
                "Token role no longer matches stored role"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthContext::new(user))
    }
}
