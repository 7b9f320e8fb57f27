//! Common state machine error types
//!
//! Shared across all domain crates that implement state machines.

use thiserror::Error;

use crate::error::Error as AppError;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

impl From<StateError> for AppError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::GuardFailed(msg) => AppError::Validation(msg),
            other => AppError::Conflict(other.to_string()),
        }
    }
}
