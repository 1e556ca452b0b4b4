//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::log::RunLogEntry;

/// One execution attempt of a pipeline
///
/// A run is created `Running` and is written exactly once more, when it
/// reaches a terminal status. `end_time` is set iff the status is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineRun {
    pub id: i64,
    pub pipeline_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: RunStatus,
    pub rows_processed: i32,
    pub logs: Vec<RunLogEntry>,
}

impl PipelineRun {
    /// Applies a terminal transition in place.
    ///
    /// Returns `false` and leaves the run untouched if it is already terminal.
    pub fn apply(&mut self, completion: &RunCompletion) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        self.status = completion.status;
        self.end_time = Some(completion.end_time);
        self.rows_processed = completion.rows_processed;
        self.logs = completion.logs.clone();
        true
    }
}

/// Run execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(RunStatus::Running),
            "Completed" => Ok(RunStatus::Completed),
            "Failed" => Ok(RunStatus::Failed),
            other => Err(format!("unknown run status: {other}")),
        }
    }
}

/// The single terminal write applied to a running run
///
/// Only constructible through [`RunCompletion::completed`] and
/// [`RunCompletion::failed`], so a completion always carries a terminal
/// status and an end time, and a failure always reports zero rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RunCompletion {
    status: RunStatus,
    end_time: DateTime<Utc>,
    rows_processed: i32,
    logs: Vec<RunLogEntry>,
}

impl RunCompletion {
    pub fn completed(rows_processed: u32, logs: Vec<RunLogEntry>) -> Self {
        Self {
            status: RunStatus::Completed,
            end_time: Utc::now(),
            rows_processed: i32::try_from(rows_processed).unwrap_or(i32::MAX),
            logs,
        }
    }

    pub fn failed(logs: Vec<RunLogEntry>) -> Self {
        Self {
            status: RunStatus::Failed,
            end_time: Utc::now(),
            rows_processed: 0,
            logs,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn rows_processed(&self) -> i32 {
        self.rows_processed
    }

    pub fn logs(&self) -> &[RunLogEntry] {
        &self.logs
    }
}
