//! Repository implementations for Accounts domain

pub mod transactions;
pub mod users;

use sqlx::{Sqlite, SqlitePool, Transaction};

pub use transactions::{create_user_tx, set_user_approval_tx};
pub use users::{UserFilter, UserRepository};

/// Combined repository access for the Accounts domain
#[derive(Clone)]
pub struct AccountsRepositories {
    pool: SqlitePool,
    pub users: UserRepository,
}

impl AccountsRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}
