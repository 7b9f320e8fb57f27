//! Repository implementations for Marketplace domain

pub mod orders;
pub mod products;
pub mod startups;
pub mod structures;
pub mod transactions;

use sqlx::{Sqlite, SqlitePool, Transaction};

pub use orders::{OrderRepository, OrderScope};
pub use products::ProductRepository;
pub use startups::StartupRepository;
pub use structures::StructureRepository;
pub use transactions::{
    create_startup_profile_tx, create_structure_profile_tx, set_profile_approval_tx,
};

/// Combined repository access for the Marketplace domain
#[derive(Clone)]
pub struct MarketplaceRepositories {
    pool: SqlitePool,
    pub startups: StartupRepository,
    pub structures: StructureRepository,
    pub products: ProductRepository,
    pub orders: OrderRepository,
}

impl MarketplaceRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            startups: StartupRepository::new(pool.clone()),
            structures: StructureRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}
