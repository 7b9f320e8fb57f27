//! Startup directory and own-profile handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use venturesroom_auth::{ApprovedStartup, AuthContext, RoleUser, StartupAccount};
use venturesroom_common::{Error, Pagination, ValidatedJson};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::MarketplaceState;
use crate::domain::entities::{merge_text, Product, Startup};

/// Directory filters for `GET /startups`
#[derive(Debug, Default, Deserialize)]
pub struct StartupFilter {
    pub sector: Option<String>,
}

/// Request for updating the caller's startup profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStartupRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub sector: Option<String>,

    #[validate(length(max = 100))]
    pub stage: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,
}

/// Load the startup owned by the authenticated account
pub(crate) async fn own_startup(
    state: &MarketplaceState,
    ctx: &AuthContext,
) -> ApiResult<Startup> {
    state
        .repos
        .startups
        .find_by_owner(ctx.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Startup profile"))
}

/// GET /startups - Approved startups, optionally by sector
pub async fn list_startups(
    State(state): State<MarketplaceState>,
    Query(filter): Query<StartupFilter>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Startup>>> {
    let startups = state
        .repos
        .startups
        .list_approved(filter.sector.as_deref(), page.limit(), page.offset())
        .await?;

    Ok(Json(startups))
}

/// GET /startups/{id} - One approved startup
pub async fn get_startup(
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Startup>> {
    let startup = state
        .repos
        .startups
        .find_approved(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Startup"))?;

    Ok(Json(startup))
}

/// GET /startups/{id}/products - Active catalogue of an approved startup
pub async fn list_startup_products(
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Product>>> {
    if state.repos.startups.find_approved(id).await?.is_none() {
        return Err(ApiError::not_found("Startup"));
    }

    let products = state
        .repos
        .products
        .list_visible(Some(id), page.limit(), page.offset())
        .await?;

    Ok(Json(products))
}

/// GET /startups/me - Own profile, readable before approval
pub async fn get_my_startup(
    RoleUser(ctx, _): RoleUser<StartupAccount>,
    State(state): State<MarketplaceState>,
) -> ApiResult<Json<Startup>> {
    Ok(Json(own_startup(&state, &ctx).await?))
}

/// PATCH /startups/me - Edit own profile (approved accounts only)
pub async fn update_my_startup(
    RoleUser(ctx, _): RoleUser<ApprovedStartup>,
    State(state): State<MarketplaceState>,
    ValidatedJson(req): ValidatedJson<UpdateStartupRequest>,
) -> ApiResult<Json<Startup>> {
    let mut startup = own_startup(&state, &ctx).await?;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(Error::Validation("Name cannot be blank".to_string()).into());
        }
        startup.name = name.trim().to_string();
    }
    merge_text(&mut startup.sector, req.sector);
    merge_text(&mut startup.stage, req.stage);
    merge_text(&mut startup.description, req.description);
    merge_text(&mut startup.website, req.website);
    startup.updated_at = Utc::now();

    let updated = state
        .repos
        .startups
        .update_profile(&startup)
        .await?
        .ok_or_else(|| ApiError::not_found("Startup profile"))?;

    tracing::info!(user_id = %ctx.user_id(), startup_id = %updated.id, "Startup profile updated");
    Ok(Json(updated))
}
