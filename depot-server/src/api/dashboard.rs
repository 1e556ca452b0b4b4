//! Dashboard API Handler

use axum::{Json, extract::State};
use depot_core::domain::dashboard::DashboardStats;

use crate::api::error::ApiResult;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    tracing::debug!("Computing dashboard stats");

    let stats = state.aggregator.compute_stats().await?;

    Ok(Json(stats))
}
