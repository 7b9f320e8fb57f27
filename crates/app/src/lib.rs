//! VenturesRoom application composition root
//!
//! Composes all domain routers into a single application.

use axum::{routing::get, Router};
use sqlx::SqlitePool;

use venturesroom_accounts::{seed_admin, AccountsRepositories, AccountsState};
use venturesroom_auth::{AuthBackend, AuthConfig};
use venturesroom_common::Config;
use venturesroom_marketplace::{MarketplaceRepositories, MarketplaceState};

/// Banner served at `/`
pub const BANNER: &str = concat!("VenturesRoom API v", env!("CARGO_PKG_VERSION"));

/// Create the main application router with all routes.
///
/// Seeds the configured administrator first, so the returned router is
/// immediately usable by that account.
pub async fn create_app(config: &Config, pool: SqlitePool) -> anyhow::Result<Router> {
    let auth = AuthBackend::new(pool.clone(), AuthConfig::from(config));

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        seed_admin(&accounts_state.repos, email, password).await?;
    } else if config.admin_email.is_some() || config.admin_password.is_some() {
        tracing::warn!("ADMIN_EMAIL and ADMIN_PASSWORD must both be set to seed an administrator");
    }

    let marketplace_state = MarketplaceState {
        repos: MarketplaceRepositories::new(pool),
        auth,
        commission_rate_bps: config.commission_rate_bps,
    };

    // Domain routers plus infrastructure routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { BANNER }))
        .merge(venturesroom_accounts::routes(&accounts_state).with_state(accounts_state))
        .merge(venturesroom_marketplace::routes().with_state(marketplace_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
