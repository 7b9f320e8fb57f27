//! Marketplace domain: startup and structure profiles, products, orders, commissions

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    order_amounts, CommissionSummary, Order, Product, Startup, Structure, MAX_ORDER_QUANTITY,
};
pub use domain::state::{OrderEvent, OrderStateMachine, OrderStatus, StateError};

// Re-export repository types
pub use repository::{
    create_startup_profile_tx, create_structure_profile_tx, set_profile_approval_tx,
    MarketplaceRepositories, OrderRepository, OrderScope, ProductRepository, StartupRepository,
    StructureRepository,
};

// Re-export API types
pub use api::routes;
pub use api::MarketplaceState;
