//! Route-layer form of the gates
//!
//! For routers where every route shares one allow-list. Layer order matters:
//! `authenticate` must wrap `require_roles`, so it is added last:
//!
//! ```ignore
//! Router::new()
//!     .route("/admin/users", get(list_users))
//!     .route_layer(from_fn_with_state(AllowedRoles(&[Role::Admin]), require_roles))
//!     .route_layer(from_fn_with_state(backend, authenticate))
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::authorize::authorize;
use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_token;
use crate::types::Role;

/// Allow-list carried as middleware state
#[derive(Debug, Clone, Copy)]
pub struct AllowedRoles(pub &'static [Role]);

/// Authentication gate: attach the caller's `AuthContext` to the request
pub async fn authenticate(
    State(backend): State<AuthBackend>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(req.headers(), &backend.config().cookie_name)?;
    let auth_context = backend.authenticate_token(&token).await?;

    req.extensions_mut().insert(auth_context);
    Ok(next.run(req).await)
}

/// Authorization gate over the identity attached by `authenticate`
pub async fn require_roles(
    State(allowed): State<AllowedRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize(req.extensions().get::<AuthContext>(), allowed.0)?;
    Ok(next.run(req).await)
}
