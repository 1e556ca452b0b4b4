//! Supplier API Handlers

use axum::{Json, extract::State, http::StatusCode};
use depot_core::domain::supplier::Supplier;
use depot_core::dto::supplier::CreateSupplier;

use crate::api::error::ApiResult;
use crate::service::supplier_service;
use crate::state::AppState;

/// GET /api/suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> ApiResult<Json<Vec<Supplier>>> {
    tracing::debug!("Listing suppliers");

    let suppliers = supplier_service::list_suppliers(state.store.as_ref()).await?;

    Ok(Json(suppliers))
}

/// POST /api/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(req): Json<CreateSupplier>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    tracing::info!("Creating supplier: {}", req.name);

    let supplier = supplier_service::create_supplier(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}
