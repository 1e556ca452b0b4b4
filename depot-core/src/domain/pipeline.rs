//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ETL pipeline definition
///
/// Pipelines are registered once and never updated; every execution is a
/// separate [`PipelineRun`](crate::domain::run::PipelineRun).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Cron expression or free-form description
    pub schedule: Option<String>,
    #[serde(rename = "type")]
    pub kind: PipelineKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineKind {
    Batch,
    Streaming,
}

impl PipelineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineKind::Batch => "Batch",
            PipelineKind::Streaming => "Streaming",
        }
    }
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Batch" => Ok(PipelineKind::Batch),
            "Streaming" => Ok(PipelineKind::Streaming),
            other => Err(format!("unknown pipeline type: {other}")),
        }
    }
}
