//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::authorize::RolePolicy;
use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_token;

/// Authenticated user extractor (cookie or bearer token).
///
/// Reuses the identity attached by the `authenticate` route layer when it
/// ran, so a request never loads the user twice.
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthContext>() {
            return Ok(AuthUser(ctx.clone()));
        }

        let backend = AuthBackend::from_ref(state);

        let token = extract_token(&parts.headers, &backend.config().cookie_name)?;
        let auth_context = backend.authenticate_token(&token).await?;

        Ok(AuthUser(auth_context))
    }
}

/// Role-gated authenticated user extractor.
///
/// Runs the authentication gate, then the policy `P` (allow-list and, for
/// some policies, the approval flag). Rejects with 401/403.
#[derive(Debug)]
pub struct RoleUser<P>(pub AuthContext, pub PhantomData<P>);

impl<P, S> FromRequestParts<S> for RoleUser<P>
where
    P: RolePolicy,
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let AuthUser(auth_context) = AuthUser::from_request_parts(parts, state).await?;

        P::check(&auth_context)?;

        Ok(RoleUser(auth_context, PhantomData))
    }
}
