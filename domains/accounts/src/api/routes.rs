//! Route definitions for Accounts domain API

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use venturesroom_auth::{authenticate, require_roles, AllowedRoles, Role};

use super::handlers::{admin, auth, users};
use super::middleware::AccountsState;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Create session routes
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Create self-service profile routes
fn user_routes() -> Router<AccountsState> {
    Router::new().route("/users/me", patch(users::update_me))
}

/// Create admin user-management routes, gated as a group
fn admin_routes(state: &AccountsState) -> Router<AccountsState> {
    Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/pending", get(admin::list_pending))
        .route("/admin/users/{id}", get(admin::get_user))
        .route("/admin/users/{id}/approve", post(admin::approve_user))
        .route("/admin/users/{id}/revoke", post(admin::revoke_user))
        .route("/admin/stats", get(admin::stats))
        .route_layer(from_fn_with_state(AllowedRoles(ADMIN_ONLY), require_roles))
        .route_layer(from_fn_with_state(state.auth.clone(), authenticate))
}

/// Create all Accounts domain API routes
pub fn routes(state: &AccountsState) -> Router<AccountsState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes(state))
}
