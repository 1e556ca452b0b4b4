//! Pipeline run DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::log::RunLogEntry;
use crate::domain::run::RunStatus;

/// A run to be inserted into the store
///
/// `start_time` defaults to the insertion instant. Historical runs (seed
/// data, tests) may carry an explicit start time, terminal status and
/// end time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPipelineRun {
    pub pipeline_id: i64,
    pub status: RunStatus,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rows_processed: i32,
    #[serde(default)]
    pub logs: Vec<RunLogEntry>,
}

impl NewPipelineRun {
    /// A freshly triggered run: `Running`, zero rows, no end time
    pub fn running(pipeline_id: i64, logs: Vec<RunLogEntry>) -> Self {
        Self {
            pipeline_id,
            status: RunStatus::Running,
            start_time: None,
            end_time: None,
            rows_processed: 0,
            logs,
        }
    }
}
