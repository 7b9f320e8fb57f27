//! Marketplace domain state and auth backend integration

use crate::MarketplaceRepositories;
use axum::extract::FromRef;
use venturesroom_auth::AuthBackend;

/// Application state for the Marketplace domain
#[derive(Clone)]
pub struct MarketplaceState {
    pub repos: MarketplaceRepositories,
    pub auth: AuthBackend,
    /// Platform commission applied to new orders, in basis points
    pub commission_rate_bps: i64,
}

impl FromRef<MarketplaceState> for AuthBackend {
    fn from_ref(state: &MarketplaceState) -> Self {
        state.auth.clone()
    }
}
