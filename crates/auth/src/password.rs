//! Salted password hashing (argon2id, PHC string format)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("hash error: {0}")]
    Hash(String),
}

lazy_static! {
    /// Hash checked when the account does not exist, so unknown emails cost
    /// as much as wrong passwords
    static ref DUMMY_HASH: String = hash_password("venturesroom-unknown-account")
        .expect("argon2 hashing with default parameters");
}

pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|p| p.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check `plain` against a stored hash.
///
/// A stored value that is not a PHC string never matches.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Hash on the blocking pool
pub async fn hash_password_blocking(plain: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| PasswordError::Hash(e.to_string()))?
}

/// Check a login attempt on the blocking pool.
///
/// `stored` is `None` for an unknown account; a dummy hash is still verified
/// and the result is always `false`.
pub async fn check_credentials(plain: String, stored: Option<String>) -> bool {
    let known = stored.is_some();
    let hash = stored.unwrap_or_else(|| DUMMY_HASH.clone());

    match tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await {
        Ok(matches) => known && matches,
        Err(e) => {
            tracing::error!(error = %e, "Password verification task failed");
            false
        }
    }
}
