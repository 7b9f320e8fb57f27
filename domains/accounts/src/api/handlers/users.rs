//! Self-service profile handlers
//!
//! Always act on the authenticated account's own id.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use venturesroom_auth::AuthUser;
use venturesroom_common::{Error, ValidatedJson};

use super::auth::UserEnvelope;
use crate::api::error::ApiResult;
use crate::api::middleware::AccountsState;
use crate::domain::validation::{normalize_full_name, MAX_FULL_NAME_LENGTH};

/// Request for updating the caller's profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name; blank clears it
    #[validate(length(max = MAX_FULL_NAME_LENGTH))]
    pub full_name: Option<String>,
}

/// PATCH /users/me - Update own display name
pub async fn update_me(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let updated = state
        .repos
        .users
        .update_full_name(ctx.user_id(), normalize_full_name(req.full_name))
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %updated.id, "Profile updated");
    Ok(Json(UserEnvelope {
        success: true,
        user: updated.into(),
    }))
}
