//! Pipeline Service
//!
//! Registration and lookup of pipelines and their runs. Triggering a run is
//! handled by [`crate::engine::RunEngine`].

use depot_core::domain::pipeline::Pipeline;
use depot_core::domain::run::PipelineRun;
use depot_core::dto::pipeline::CreatePipeline;

use super::{Result, ServiceError, require_text};
use crate::repository::Store;

/// Register a new pipeline
pub async fn create_pipeline(store: &dyn Store, req: CreatePipeline) -> Result<Pipeline> {
    validate_pipeline_request(&req)?;

    let pipeline = store.create_pipeline(req).await?;

    tracing::info!("Pipeline created: {} ({})", pipeline.name, pipeline.id);

    Ok(pipeline)
}

/// Get a pipeline by ID
pub async fn get_pipeline(store: &dyn Store, id: i64) -> Result<Pipeline> {
    store
        .find_pipeline(id)
        .await?
        .ok_or_else(|| pipeline_not_found(id))
}

/// List all pipelines
pub async fn list_pipelines(store: &dyn Store) -> Result<Vec<Pipeline>> {
    Ok(store.list_pipelines().await?)
}

/// List the runs of a pipeline, most recently started first
pub async fn list_runs(store: &dyn Store, pipeline_id: i64) -> Result<Vec<PipelineRun>> {
    // Verify pipeline exists
    get_pipeline(store, pipeline_id).await?;

    Ok(store.list_runs_for_pipeline(pipeline_id).await?)
}

pub(crate) fn pipeline_not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Pipeline {} not found", id))
}

fn validate_pipeline_request(req: &CreatePipeline) -> Result<()> {
    require_text("Pipeline name", &req.name)?;

    if req.name.len() > 255 {
        return Err(ServiceError::Validation(
            "Pipeline name is too long (max 255 characters)".to_string(),
        ));
    }

    require_text("Pipeline description", &req.description)?;

    if let Some(schedule) = &req.schedule {
        require_text("Pipeline schedule", schedule)?;
    }

    Ok(())
}
