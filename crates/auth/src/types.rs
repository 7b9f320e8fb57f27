//! Auth read-model types
//!
//! Lightweight views of the `users` rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account category determining permitted operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Startup,
    Structure,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Client, Role::Startup, Role::Structure, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Startup => "startup",
            Role::Structure => "structure",
            Role::Admin => "admin",
        }
    }

    /// Clients and admins never wait for an approval decision
    pub fn is_auto_approved(&self) -> bool {
        matches!(self, Role::Client | Role::Admin)
    }

    /// Admins are provisioned out of band, never through public registration
    pub fn is_self_registrable(&self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "startup" => Ok(Role::Startup),
            "structure" => Ok(Role::Structure),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Lightweight identity for authenticated users.
///
/// Always loaded from the credential store on each request; the token only
/// tells the gate which row to load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AuthIdentity {
    /// Whether the account may act beyond reading its own profile
    pub fn is_effectively_approved(&self) -> bool {
        self.role.is_auto_approved() || self.is_approved
    }
}
