//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use depot_core::domain::product::Product;
use depot_core::dto::product::CreateProduct;

use crate::api::error::ApiResult;
use crate::service::product_service;
use crate::state::AppState;

/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    tracing::debug!("Listing products");

    let products = product_service::list_products(state.store.as_ref()).await?;

    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    tracing::debug!("Getting product: {}", id);

    let product = product_service::get_product(state.store.as_ref(), id).await?;

    Ok(Json(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    tracing::info!("Creating product: {} ({})", req.name, req.sku);

    let product = product_service::create_product(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(product)))
}
