//! State machine for order fulfilment
//!
//! Order states: Pending → Confirmed → Delivered; Pending | Confirmed → Cancelled.
//! Delivered and Cancelled are terminal.

use serde::{Deserialize, Serialize};

pub use venturesroom_common::StateError;

/// Order status, stored as lowercase text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Delivered, Self::Cancelled],
            Self::Delivered => &[],
            Self::Cancelled => &[],
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Events that trigger order state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderEvent {
    /// Seller accepts the order
    Confirm,
    /// Seller reports the order as fulfilled
    Deliver,
    /// Buyer or seller calls the order off
    Cancel,
}

impl OrderEvent {
    /// Event that moves an order into `target`, if any
    pub fn for_target(target: OrderStatus) -> Option<Self> {
        match target {
            OrderStatus::Pending => None,
            OrderStatus::Confirmed => Some(Self::Confirm),
            OrderStatus::Delivered => Some(Self::Deliver),
            OrderStatus::Cancelled => Some(Self::Cancel),
        }
    }
}

impl std::fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Confirm => write!(f, "confirm"),
            Self::Deliver => write!(f, "deliver"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Order state machine
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Attempt a state transition
    pub fn transition(current: OrderStatus, event: OrderEvent) -> Result<OrderStatus, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (OrderStatus::Pending, OrderEvent::Confirm) => OrderStatus::Confirmed,
            (OrderStatus::Confirmed, OrderEvent::Deliver) => OrderStatus::Delivered,
            (OrderStatus::Pending | OrderStatus::Confirmed, OrderEvent::Cancel) => {
                OrderStatus::Cancelled
            }
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: OrderStatus, event: &OrderEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}
