//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::PipelineKind;

/// Request to register a new pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipeline {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(rename = "type")]
    pub kind: PipelineKind,
}
