//! Domain entities for the Accounts domain

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::ValidateEmail;

use venturesroom_auth::{AuthIdentity, Role};
use venturesroom_common::{Error, Result};

use crate::domain::state::{ApprovalEvent, ApprovalGuardContext, ApprovalState, ApprovalStateMachine};
use crate::domain::validation::normalize_email;

/// Credential record
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account. Clients and admins start approved.
    pub fn new(
        email: &str,
        password_hash: String,
        full_name: Option<String>,
        role: Role,
    ) -> Result<Self> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            role,
            is_approved: role.is_auto_approved(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn approval_state(&self) -> ApprovalState {
        ApprovalState::of(self.is_approved)
    }

    /// Whether this account may sign in now
    pub fn can_sign_in(&self) -> bool {
        self.role.is_auto_approved() || self.is_approved
    }

    /// Run an approval event through the state machine, updating the flag in place
    pub fn apply(&mut self, event: ApprovalEvent) -> Result<()> {
        let context = ApprovalGuardContext { role: self.role };
        let next = ApprovalStateMachine::transition(self.approval_state(), event, Some(&context))?;

        self.is_approved = next.is_approved();
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_approved: user.is_approved,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<AuthIdentity> for UserResponse {
    fn from(identity: AuthIdentity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            full_name: identity.full_name,
            role: identity.role,
            is_approved: identity.is_approved,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Account counts for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
pub struct UserStats {
    pub total: i64,
    pub clients: i64,
    pub startups: i64,
    pub structures: i64,
    pub admins: i64,
    /// Startups and structures awaiting approval
    pub pending: i64,
}
