//! Product catalogue handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use venturesroom_auth::{ApprovedStartup, RoleUser};
use venturesroom_common::{Pagination, ValidatedJson};

use super::startups::own_startup;
use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::MarketplaceState;
use crate::domain::entities::{Product, Startup};

/// Request for listing a new product
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,
}

/// Request for editing a product; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: Option<i64>,

    pub is_active: Option<bool>,
}

/// Load a product that belongs to `startup`. Foreign products look missing.
async fn owned_product(
    state: &MarketplaceState,
    startup: &Startup,
    id: Uuid,
) -> ApiResult<Product> {
    state
        .repos
        .products
        .find(id)
        .await?
        .filter(|product| product.startup_id == startup.id)
        .ok_or_else(|| ApiError::not_found("Product"))
}

/// GET /products - Active products of approved startups
pub async fn list_products(
    State(state): State<MarketplaceState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = state
        .repos
        .products
        .list_visible(None, page.limit(), page.offset())
        .await?;

    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Product>> {
    let product = state
        .repos
        .products
        .find_visible(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    Ok(Json(product))
}

/// POST /products - List a product under the caller's startup
pub async fn create_product(
    RoleUser(ctx, _): RoleUser<ApprovedStartup>,
    State(state): State<MarketplaceState>,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let startup = own_startup(&state, &ctx).await?;

    let product = Product::new(startup.id, req.name, req.description, req.price_cents)?;
    let created = state.repos.products.create(&product).await?;

    tracing::info!(
        user_id = %ctx.user_id(),
        startup_id = %startup.id,
        product_id = %created.id,
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /products/{id}
pub async fn update_product(
    RoleUser(ctx, _): RoleUser<ApprovedStartup>,
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<Json<Product>> {
    let startup = own_startup(&state, &ctx).await?;
    let mut product = owned_product(&state, &startup, id).await?;

    product.apply_update(req.name, req.description, req.price_cents, req.is_active)?;

    let updated = state
        .repos
        .products
        .update(&product)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    Ok(Json(updated))
}

/// DELETE /products/{id} - Archive; existing orders keep their reference
pub async fn delete_product(
    RoleUser(ctx, _): RoleUser<ApprovedStartup>,
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let startup = own_startup(&state, &ctx).await?;
    let product = owned_product(&state, &startup, id).await?;

    state.repos.products.archive(product.id).await?;

    tracing::info!(user_id = %ctx.user_id(), product_id = %product.id, "Product archived");
    Ok(StatusCode::NO_CONTENT)
}
