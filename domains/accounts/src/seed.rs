//! Out-of-band administrator provisioning
//!
//! Admin accounts never come from public registration; they are created at
//! start-up from configured credentials.

use anyhow::{bail, Context};
use venturesroom_auth::{hash_password, Role};

use crate::domain::entities::User;
use crate::domain::validation::normalize_email;
use crate::repository::{create_user_tx, AccountsRepositories};

/// What `seed_admin` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyPresent,
}

/// Ensure an administrator with `email` exists.
///
/// An existing admin is left untouched, password included. An existing
/// non-admin account with that email is an error.
pub async fn seed_admin(
    repos: &AccountsRepositories,
    email: &str,
    password: &str,
) -> anyhow::Result<SeedOutcome> {
    let email = normalize_email(email);

    if let Some(existing) = repos.users.find_by_email(&email).await? {
        if existing.role != Role::Admin {
            bail!("ADMIN_EMAIL {email} belongs to a {} account", existing.role);
        }
        tracing::debug!(user_id = %existing.id, "Admin account already present");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = hash_password(password).context("Failed to hash admin password")?;
    let admin = User::new(&email, password_hash, Some("Administrator".to_string()), Role::Admin)?;

    let mut tx = repos.begin().await?;
    let created = create_user_tx(&mut tx, &admin).await?;
    tx.commit().await?;

    tracing::info!(user_id = %created.id, email = %created.email, "Admin account seeded");
    Ok(SeedOutcome::Created)
}
