//! Validation helpers and constants for account input

use regex::Regex;
use venturesroom_auth::Role;
use venturesroom_common::FieldError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum display name length
pub const MAX_FULL_NAME_LENGTH: u64 = 100;

lazy_static::lazy_static! {
    /// Runs of whitespace inside display names
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Canonical form of an email address used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim and collapse inner whitespace; blank names become `None`
pub fn normalize_full_name(name: Option<String>) -> Option<String> {
    let name = name?;
    let collapsed = WHITESPACE_RUN.replace_all(name.trim(), " ").into_owned();
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Role requested at public registration. Defaults to `client`; admins are never self-registered.
pub fn parse_registration_role(role: Option<&str>) -> Result<Role, FieldError> {
    let invalid = || FieldError::new("role", "Role must be one of: client, startup, structure");

    let Some(role) = role else {
        return Ok(Role::Client);
    };

    let role: Role = role.parse().map_err(|_| invalid())?;
    if !role.is_self_registrable() {
        return Err(invalid());
    }

    Ok(role)
}
