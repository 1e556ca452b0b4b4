//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use depot_core::domain::inventory::InventoryItem;
use depot_core::dto::inventory::{InventoryWithProduct, UpdateInventoryItem};

use crate::api::error::ApiResult;
use crate::service::inventory_service;
use crate::state::AppState;

/// GET /api/inventory
/// Inventory rows joined with their product
pub async fn list_inventory(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InventoryWithProduct>>> {
    tracing::debug!("Listing inventory");

    let items = inventory_service::list_inventory(state.store.as_ref()).await?;

    Ok(Json(items))
}

/// PUT /api/inventory/{id}
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateInventoryItem>,
) -> ApiResult<Json<InventoryItem>> {
    tracing::info!("Updating inventory item: {}", id);

    let item = inventory_service::update_inventory_item(state.store.as_ref(), id, req).await?;

    Ok(Json(item))
}
