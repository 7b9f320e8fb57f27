//! Admin user management handlers
//!
//! Mounted behind the `authenticate` and `require_roles` route layers, so every
//! handler here runs for an authenticated administrator.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use venturesroom_auth::{AuthUser, Role};
use venturesroom_common::{Error, FieldError, Pagination};
use venturesroom_marketplace::set_profile_approval_tx;

use super::auth::UserEnvelope;
use crate::api::error::ApiResult;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{UserResponse, UserStats};
use crate::domain::state::ApprovalEvent;
use crate::repository::{set_user_approval_tx, UserFilter};

/// Query filters for `GET /admin/users`
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub approved: Option<bool>,
}

impl UserListQuery {
    fn into_filter(self) -> Result<UserFilter, Error> {
        let role = self
            .role
            .as_deref()
            .map(str::parse::<Role>)
            .transpose()
            .map_err(|_| {
                Error::InvalidInput(vec![FieldError::new(
                    "role",
                    "Role must be one of: client, startup, structure, admin",
                )])
            })?;

        Ok(UserFilter {
            role,
            is_approved: self.approved,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: UserStats,
}

/// GET /admin/users
pub async fn list_users(
    State(state): State<AccountsState>,
    Query(query): Query<UserListQuery>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<UserListResponse>> {
    let users = state
        .repos
        .users
        .list(query.into_filter()?, page.limit(), page.offset())
        .await?;

    Ok(Json(UserListResponse {
        success: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// GET /admin/users/pending
pub async fn list_pending(
    State(state): State<AccountsState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<UserListResponse>> {
    let users = state
        .repos
        .users
        .list_pending(page.limit(), page.offset())
        .await?;

    Ok(Json(UserListResponse {
        success: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// GET /admin/users/{id}
pub async fn get_user(
    State(state): State<AccountsState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserEnvelope>> {
    let user = state
        .repos
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(UserEnvelope {
        success: true,
        user: user.into(),
    }))
}

/// Apply an approval event to an account and its marketplace profile in one transaction
async fn change_approval(
    state: &AccountsState,
    admin_id: Uuid,
    id: Uuid,
    event: ApprovalEvent,
) -> ApiResult<UserResponse> {
    let mut user = state
        .repos
        .users
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    user.apply(event)?;

    let mut tx = state.repos.begin().await?;
    let updated = set_user_approval_tx(&mut tx, &user).await?.ok_or_else(|| {
        Error::Conflict("User approval was changed by another request".to_string())
    })?;
    let profiles = set_profile_approval_tx(&mut tx, updated.id, updated.is_approved).await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = %admin_id,
        user_id = %updated.id,
        role = %updated.role,
        %event,
        profiles,
        "Account approval changed"
    );

    Ok(updated.into())
}

/// POST /admin/users/{id}/approve
pub async fn approve_user(
    AuthUser(admin): AuthUser,
    State(state): State<AccountsState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApprovalResponse>> {
    let user = change_approval(&state, admin.user_id(), id, ApprovalEvent::Approve).await?;

    Ok(Json(ApprovalResponse {
        success: true,
        message: "User approved".to_string(),
        user,
    }))
}

/// POST /admin/users/{id}/revoke
pub async fn revoke_user(
    AuthUser(admin): AuthUser,
    State(state): State<AccountsState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApprovalResponse>> {
    let user = change_approval(&state, admin.user_id(), id, ApprovalEvent::Revoke).await?;

    Ok(Json(ApprovalResponse {
        success: true,
        message: "User approval revoked".to_string(),
        user,
    }))
}

/// GET /admin/stats
pub async fn stats(State(state): State<AccountsState>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.repos.users.stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
