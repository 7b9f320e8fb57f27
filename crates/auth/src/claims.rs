//! JWT claims types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// Session claims carried by every bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Subject (user ID)
    pub user_id: Uuid,
    /// Email at issuance
    pub email: String,
    /// Role at issuance
    pub role: Role,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
}
