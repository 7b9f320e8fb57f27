//! Authorization context for authenticated users

use uuid::Uuid;

use crate::types::{AuthIdentity, Role};

/// Represents an authenticated user context.
///
/// Built once per request by the authentication gate and passed by value to
/// handlers; nothing in it is shared across requests.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    /// Check whether the current role appears in an allow-list
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.user.role)
    }

    /// Approved by an administrator, or a role that never needs approval
    pub fn is_approved(&self) -> bool {
        self.user.is_effectively_approved()
    }
}
