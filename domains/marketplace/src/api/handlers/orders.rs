//! Order placement and fulfilment handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use venturesroom_auth::{AuthContext, AuthError, AuthUser, ClientOnly, Role, RoleUser, StartupOrAdmin};
use venturesroom_common::{Error, Pagination, ValidatedJson};

use crate::api::error::{ApiError, ApiResult};
use crate::api::middleware::MarketplaceState;
use crate::domain::entities::{Order, MAX_ORDER_QUANTITY};
use crate::domain::state::{OrderEvent, OrderStatus};
use crate::repository::OrderScope;

/// Request for placing an order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = MAX_ORDER_QUANTITY, message = "Quantity must be between 1 and 1000"))]
    pub quantity: i64,
}

/// Request for moving an order along its lifecycle
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Orders the caller may list, by role. Startups must currently be approved.
async fn scope_for(state: &MarketplaceState, ctx: &AuthContext) -> ApiResult<Option<OrderScope>> {
    if ctx.role() == Role::Startup && !ctx.is_approved() {
        tracing::debug!(user_id = %ctx.user_id(), "Unapproved startup reading orders");
        return Err(AuthError::PendingApproval.into());
    }

    let scope = match ctx.role() {
        Role::Admin => Some(OrderScope::All),
        Role::Client => Some(OrderScope::Client(ctx.user_id())),
        Role::Startup => state
            .repos
            .startups
            .find_by_owner(ctx.user_id())
            .await?
            .map(|startup| OrderScope::Startup(startup.id)),
        Role::Structure => return Err(AuthError::Forbidden.into()),
    };

    Ok(scope)
}

/// Whether `order` falls inside `scope`
fn in_scope(order: &Order, scope: Option<OrderScope>) -> bool {
    match scope {
        Some(OrderScope::All) => true,
        Some(OrderScope::Client(id)) => order.client_id == id,
        Some(OrderScope::Startup(id)) => order.startup_id == id,
        None => false,
    }
}

/// Load an order visible to the caller. Invisible orders look missing.
async fn visible_order(
    state: &MarketplaceState,
    ctx: &AuthContext,
    id: Uuid,
) -> ApiResult<Order> {
    let scope = scope_for(state, ctx).await?;

    state
        .repos
        .orders
        .find(id)
        .await?
        .filter(|order| in_scope(order, scope))
        .ok_or_else(|| ApiError::not_found("Order"))
}

async fn save_transition(
    state: &MarketplaceState,
    ctx: &AuthContext,
    mut order: Order,
    event: OrderEvent,
) -> ApiResult<Order> {
    let from = order.status;
    order.apply(event)?;

    let updated = state
        .repos
        .orders
        .update_status(&order)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

    tracing::info!(
        user_id = %ctx.user_id(),
        order_id = %updated.id,
        %from,
        to = %updated.status,
        "Order status changed"
    );
    Ok(updated)
}

/// POST /orders - Place an order at the product's current price
pub async fn create_order(
    RoleUser(ctx, _): RoleUser<ClientOnly>,
    State(state): State<MarketplaceState>,
    ValidatedJson(req): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let product = state
        .repos
        .products
        .find_visible(req.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product"))?;

    let order = Order::place(ctx.user_id(), &product, req.quantity, state.commission_rate_bps)?;
    let created = state.repos.orders.create(&order).await?;

    tracing::info!(
        user_id = %ctx.user_id(),
        order_id = %created.id,
        product_id = %product.id,
        total_cents = created.total_cents,
        commission_cents = created.commission_cents,
        "Order placed"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /orders - Orders visible to the caller
pub async fn list_orders(
    AuthUser(ctx): AuthUser,
    State(state): State<MarketplaceState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Order>>> {
    let Some(scope) = scope_for(&state, &ctx).await? else {
        return Ok(Json(Vec::new()));
    };

    let orders = state
        .repos
        .orders
        .list(scope, page.limit(), page.offset())
        .await?;

    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get_order(
    AuthUser(ctx): AuthUser,
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    Ok(Json(visible_order(&state, &ctx, id).await?))
}

/// PATCH /orders/{id}/status - Selling startup or admin moves the order on
pub async fn update_order_status(
    RoleUser(ctx, _): RoleUser<StartupOrAdmin>,
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateOrderStatusRequest>,
) -> ApiResult<Json<Order>> {
    let order = visible_order(&state, &ctx, id).await?;

    let event = OrderEvent::for_target(req.status).ok_or_else(|| {
        ApiError::App(Error::Validation(
            "Orders cannot be moved back to pending".to_string(),
        ))
    })?;

    Ok(Json(save_transition(&state, &ctx, order, event).await?))
}

/// POST /orders/{id}/cancel - Buyer calls off an order before delivery
pub async fn cancel_order(
    RoleUser(ctx, _): RoleUser<ClientOnly>,
    State(state): State<MarketplaceState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let order = visible_order(&state, &ctx, id).await?;

    Ok(Json(
        save_transition(&state, &ctx, order, OrderEvent::Cancel).await?,
    ))
}
