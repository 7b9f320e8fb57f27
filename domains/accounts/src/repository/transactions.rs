//! Transaction helpers for multi-table account writes

use sqlx::{Sqlite, Transaction};

use venturesroom_common::{RepositoryError, Result};

use crate::domain::entities::User;
use crate::repository::users::{into_user, UserRow, USER_COLUMNS};

/// Insert a user within an existing transaction.
///
/// A duplicate email surfaces as `RepositoryError::AlreadyExists`.
pub async fn create_user_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user: &User,
) -> std::result::Result<User, RepositoryError> {
    let query = format!(
        "INSERT INTO users ({USER_COLUMNS}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.is_approved)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(RepositoryError::from_insert)?;

    User::try_from(row)
}

/// Flip a user's approval flag to `user.is_approved` within an existing transaction.
///
/// Only a row still holding the opposite flag is updated, so `None` means the
/// user is gone or another writer already made the same change.
pub async fn set_user_approval_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user: &User,
) -> Result<Option<User>> {
    let query = format!(
        "UPDATE users SET is_approved = ?, updated_at = ? \
         WHERE id = ? AND is_approved = ? RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, UserRow>(&query)
        .bind(user.is_approved)
        .bind(user.updated_at)
        .bind(user.id)
        .bind(!user.is_approved)
        .fetch_optional(&mut **tx)
        .await?;

    into_user(row)
}
