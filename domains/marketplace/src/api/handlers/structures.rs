//! Support structure directory and own-profile handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use venturesroom_auth::{ApprovedStructure, AuthContext, RoleUser, StructureAccount};
use venturesroom_common::{Error, Pagination, ValidatedJson};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::MarketplaceState;
use crate::domain::entities::{merge_text, Structure};

/// Directory filters for `GET /structures`
#[derive(Debug, Default, Deserialize)]
pub struct StructureFilter {
    pub structure_type: Option<String>,
}

/// Request for updating the caller's structure profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStructureRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub structure_type: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
}

async fn own_structure(state: &MarketplaceState, ctx: &AuthContext) -> ApiResult<Structure> {
    state
        .repos
        .structures
        .find_by_owner(ctx.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Structure profile"))
}

/// GET /structures - Approved structures, optionally by type
pub async fn list_structures(
    State(state): State<MarketplaceState>,
    Query(filter): Query<StructureFilter>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Structure>>> {
    let structures = state
        .repos
        .structures
        .list_approved(filter.structure_type.as_deref(), page.limit(), page.offset())
        .await?;

    Ok(Json(structures))
}

/// GET /structures/{id}
pub async fn get_structure(
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Structure>> {
    let structure = state
        .repos
        .structures
        .find_approved(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Structure"))?;

    Ok(Json(structure))
}

/// GET /structures/me
pub async fn get_my_structure(
    RoleUser(ctx, _): RoleUser<StructureAccount>,
    State(state): State<MarketplaceState>,
) -> ApiResult<Json<Structure>> {
    Ok(Json(own_structure(&state, &ctx).await?))
}

/// PATCH /structures/me
pub async fn update_my_structure(
    RoleUser(ctx, _): RoleUser<ApprovedStructure>,
    State(state): State<MarketplaceState>,
    ValidatedJson(req): ValidatedJson<UpdateStructureRequest>,
) -> ApiResult<Json<Structure>> {
    let mut structure = own_structure(&state, &ctx).await?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(Error::Validation("Name cannot be blank".to_string()).into());
        }
        structure.name = name.trim().to_string();
    }
    merge_text(&mut structure.structure_type, req.structure_type);
    merge_text(&mut structure.description, req.description);
    merge_text(&mut structure.website, req.website);
    structure.updated_at = Utc::now();

    let updated = state
        .repos
        .structures
        .update_profile(&structure)
        .await?
        .ok_or_else(|| ApiError::not_found("Structure profile"))?;

    tracing::info!(user_id = %ctx.user_id(), structure_id = %updated.id, "Structure profile updated");
    Ok(Json(updated))
}
