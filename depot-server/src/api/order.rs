//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};
use depot_core::domain::order::Order;
use depot_core::dto::order::CreateOrder;

use crate::api::error::ApiResult;
use crate::service::order_service;
use crate::state::AppState;

/// GET /api/orders
/// Most recent order date first
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    tracing::debug!("Listing orders");

    let orders = order_service::list_orders(state.store.as_ref()).await?;

    Ok(Json(orders))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrder>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    tracing::info!("Creating order for product {}", req.product_id);

    let order = order_service::create_order(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(order)))
}
