//! Approval lifecycle state machine
//!
//! Startups and structures begin `Unapproved` and are moved by administrators.
//! Clients and admins are `Approved` from creation and cannot be revoked.
//! There is no terminal state.

use serde::{Deserialize, Serialize};
use venturesroom_auth::Role;

pub use venturesroom_common::StateError;

/// Approval states of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Unapproved,
    Approved,
}

impl ApprovalState {
    /// State for a stored approval flag
    pub fn of(is_approved: bool) -> Self {
        if is_approved {
            Self::Approved
        } else {
            Self::Unapproved
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [ApprovalState] {
        match self {
            Self::Unapproved => &[Self::Approved],
            Self::Approved => &[Self::Unapproved],
        }
    }
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unapproved => write!(f, "unapproved"),
            Self::Approved => write!(f, "approved"),
        }
    }
}

/// Events that trigger approval transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApprovalEvent {
    /// Administrator approves the account
    Approve,
    /// Administrator withdraws a previous approval
    Revoke,
}

impl std::fmt::Display for ApprovalEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Revoke => write!(f, "revoke"),
        }
    }
}

/// Guard context for approval transitions
#[derive(Debug, Clone)]
pub struct ApprovalGuardContext {
    /// Role of the account being moved
    pub role: Role,
}

/// Approval state machine
pub struct ApprovalStateMachine;

impl ApprovalStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: ApprovalState,
        event: ApprovalEvent,
        context: Option<&ApprovalGuardContext>,
    ) -> Result<ApprovalState, StateError> {
        match (current, event) {
            (ApprovalState::Unapproved, ApprovalEvent::Approve) => Ok(ApprovalState::Approved),
            (ApprovalState::Approved, ApprovalEvent::Revoke) => {
                if let Some(ctx) = context {
                    if ctx.role.is_auto_approved() {
                        return Err(StateError::GuardFailed(format!(
                            "{} accounts are always approved",
                            ctx.role
                        )));
                    }
                }
                Ok(ApprovalState::Unapproved)
            }
            _ => Err(StateError::InvalidTransition {
                from: current.to_string(),
                event: event.to_string(),
            }),
        }
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: ApprovalState,
        event: &ApprovalEvent,
        context: Option<&ApprovalGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}
