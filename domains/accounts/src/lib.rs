//! Accounts domain: users, registration and login, approval workflow, admin user management

pub mod api;
pub mod domain;
pub mod repository;
pub mod seed;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{User, UserResponse, UserStats};
pub use domain::state::{
    ApprovalEvent, ApprovalGuardContext, ApprovalState, ApprovalStateMachine, StateError,
};

// Re-export repository types
pub use repository::{
    create_user_tx, set_user_approval_tx, AccountsRepositories, UserFilter, UserRepository,
};

pub use seed::{seed_admin, SeedOutcome};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
