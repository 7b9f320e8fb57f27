//! Route definitions for Marketplace domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{commissions, orders, products, startups, structures};
use super::middleware::MarketplaceState;

/// Create startup directory and profile routes
fn startup_routes() -> Router<MarketplaceState> {
    Router::new()
        .route("/startups", get(startups::list_startups))
        .route(
            "/startups/me",
            get(startups::get_my_startup).patch(startups::update_my_startup),
        )
        .route("/startups/{id}", get(startups::get_startup))
        .route(
            "/startups/{id}/products",
            get(startups::list_startup_products),
        )
}

/// Create structure directory and profile routes
fn structure_routes() -> Router<MarketplaceState> {
    Router::new()
        .route("/structures", get(structures::list_structures))
        .route(
            "/structures/me",
            get(structures::get_my_structure).patch(structures::update_my_structure),
        )
        .route("/structures/{id}", get(structures::get_structure))
}

/// Create product catalogue routes
fn product_routes() -> Router<MarketplaceState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
}

/// Create order routes
fn order_routes() -> Router<MarketplaceState> {
    Router::new()
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/status", patch(orders::update_order_status))
        .route("/orders/{id}/cancel", post(orders::cancel_order))
}

/// Create admin reporting routes
fn admin_routes() -> Router<MarketplaceState> {
    Router::new().route("/admin/commissions", get(commissions::commission_report))
}

/// Create all Marketplace domain API routes
pub fn routes() -> Router<MarketplaceState> {
    Router::new()
        .merge(startup_routes())
        .merge(structure_routes())
        .merge(product_routes())
        .merge(order_routes())
        .merge(admin_routes())
}
