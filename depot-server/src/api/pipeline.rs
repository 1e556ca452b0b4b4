//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline management and run triggering.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use depot_core::domain::pipeline::Pipeline;
use depot_core::domain::run::PipelineRun;
use depot_core::dto::pipeline::CreatePipeline;

use crate::api::error::ApiResult;
use crate::service::pipeline_service;
use crate::state::AppState;

/// GET /api/pipelines
pub async fn list_pipelines(State(state): State<AppState>) -> ApiResult<Json<Vec<Pipeline>>> {
    tracing::debug!("Listing all pipelines");

    let pipelines = pipeline_service::list_pipelines(state.store.as_ref()).await?;

    Ok(Json(pipelines))
}

/// POST /api/pipelines
pub async fn create_pipeline(
    State(state): State<AppState>,
    Json(req): Json<CreatePipeline>,
) -> ApiResult<(StatusCode, Json<Pipeline>)> {
    tracing::info!("Creating pipeline: {}", req.name);

    let pipeline = pipeline_service::create_pipeline(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(pipeline)))
}

/// GET /api/pipelines/{id}/runs
/// Runs of a pipeline, most recent first
pub async fn list_runs(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<PipelineRun>>> {
    tracing::debug!("Listing runs for pipeline: {}", id);

    let runs = pipeline_service::list_runs(state.store.as_ref(), id).await?;

    Ok(Json(runs))
}

/// POST /api/pipelines/{id}/trigger
/// Starts a run and returns it while still `Running`
pub async fn trigger_pipeline(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<PipelineRun>)> {
    tracing::info!("Triggering pipeline: {}", id);

    let run = state.engine.trigger(id).await?;

    Ok((StatusCode::CREATED, Json(run)))
}
