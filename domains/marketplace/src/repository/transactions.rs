//! Transaction helpers for cross-domain profile operations
//!
//! Used by the accounts domain so that creating or approving an account and
//! its marketplace profile commit together.

use crate::domain::entities::{Startup, Structure};
use crate::repository::startups::STARTUP_COLUMNS;
use crate::repository::structures::STRUCTURE_COLUMNS;
use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;
use venturesroom_common::Result;

/// Create a startup profile within an existing transaction.
pub async fn create_startup_profile_tx(
    tx: &mut Transaction<'_, Sqlite>,
    startup: &Startup,
) -> Result<Startup> {
    let query = format!(
        "INSERT INTO startups ({STARTUP_COLUMNS}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {STARTUP_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Startup>(&query)
        .bind(startup.id)
        .bind(startup.owner_id)
        .bind(&startup.name)
        .bind(&startup.sector)
        .bind(&startup.stage)
        .bind(&startup.description)
        .bind(&startup.website)
        .bind(startup.is_approved)
        .bind(startup.created_at)
        .bind(startup.updated_at)
        .fetch_one(&mut **tx)
        .await?;

    Ok(created)
}

/// Create a structure profile within an existing transaction.
pub async fn create_structure_profile_tx(
    tx: &mut Transaction<'_, Sqlite>,
    structure: &Structure,
) -> Result<Structure> {
    let query = format!(
        "INSERT INTO structures ({STRUCTURE_COLUMNS}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {STRUCTURE_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Structure>(&query)
        .bind(structure.id)
        .bind(structure.owner_id)
        .bind(&structure.name)
        .bind(&structure.structure_type)
        .bind(&structure.description)
        .bind(&structure.website)
        .bind(structure.is_approved)
        .bind(structure.created_at)
        .bind(structure.updated_at)
        .fetch_one(&mut **tx)
        .await?;

    Ok(created)
}

/// Mirror an account's approval flag onto whichever profile it owns.
///
/// Returns the number of profile rows touched (0 when the account has none).
pub async fn set_profile_approval_tx(
    tx: &mut Transaction<'_, Sqlite>,
    owner_id: Uuid,
    is_approved: bool,
) -> Result<u64> {
    let now = Utc::now();
    let mut touched = 0;

    for table in ["startups", "structures"] {
        let query =
            format!("UPDATE {table} SET is_approved = ?, updated_at = ? WHERE owner_id = ?");
        let result = sqlx::query(&query)
            .bind(is_approved)
            .bind(now)
            .bind(owner_id)
            .execute(&mut **tx)
            .await?;
        touched += result.rows_affected();
    }

    Ok(touched)
}
