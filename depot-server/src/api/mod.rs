//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod inventory;
pub mod order;
pub mod pipeline;
pub mod product;
pub mod supplier;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Supplier endpoints
        .route(
            "/api/suppliers",
            get(supplier::list_suppliers).post(supplier::create_supplier),
        )
        // Product endpoints
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route("/api/products/{id}", get(product::get_product))
        // Inventory endpoints
        .route("/api/inventory", get(inventory::list_inventory))
        .route("/api/inventory/{id}", put(inventory::update_inventory_item))
        // Order endpoints
        .route(
            "/api/orders",
            get(order::list_orders).post(order::create_order),
        )
        // Pipeline endpoints
        .route(
            "/api/pipelines",
            get(pipeline::list_pipelines).post(pipeline::create_pipeline),
        )
        .route("/api/pipelines/{id}/runs", get(pipeline::list_runs))
        .route("/api/pipelines/{id}/trigger", post(pipeline::trigger_pipeline))
        // Dashboard
        .route("/api/dashboard/stats", get(dashboard::get_stats))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
