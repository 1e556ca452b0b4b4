//! Pipeline Run Engine
//!
//! Owns the lifecycle of a pipeline run:
//!
//! 1. `trigger` verifies the pipeline, inserts a `Running` run with a single
//!    start log line and returns it immediately.
//! 2. The run is submitted to the [`RunExecutor`], which after the simulated
//!    work writes exactly one terminal state (`Completed` or `Failed`).
//!
//! Callers polling the store see `Running` until that write lands, then the
//! terminal state; nothing in between.

pub mod executor;
pub mod simulation;

use depot_core::domain::run::PipelineRun;
use depot_core::dto::run::NewPipelineRun;
use std::sync::Arc;
use std::time::Duration;

pub use executor::{DeadLetter, RunExecutor};
pub use simulation::{OutcomeSource, RandomOutcome, SimulatedOutcome};

use crate::repository::Store;
use crate::service::Result;
use crate::service::pipeline::pipeline_not_found;

/// Tuning for run execution
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Simulated work per run; always non-zero
    pub run_duration: Duration,

    /// Runs executing at once; further runs wait for a free worker
    pub max_concurrent_runs: usize,

    /// Retry policy for the terminal write
    pub write_retry: RetryPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            run_duration: Duration::from_secs(5),
            max_concurrent_runs: 32,
            write_retry: RetryPolicy::default(),
        }
    }
}

/// Exponential backoff with cap
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before the attempt following `attempt` (1-based)
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
        }
    }
}

pub struct RunEngine {
    store: Arc<dyn Store>,
    executor: RunExecutor,
}

impl RunEngine {
    pub fn new(
        store: Arc<dyn Store>,
        outcomes: Arc<dyn OutcomeSource>,
        settings: EngineSettings,
    ) -> Self {
        let executor = RunExecutor::new(Arc::clone(&store), outcomes, settings);
        Self { store, executor }
    }

    /// Starts a new run of `pipeline_id` and returns it in `Running` state
    pub async fn trigger(&self, pipeline_id: i64) -> Result<PipelineRun> {
        self.store
            .find_pipeline(pipeline_id)
            .await?
            .ok_or_else(|| pipeline_not_found(pipeline_id))?;

        let run = self
            .store
            .create_run(NewPipelineRun::running(
                pipeline_id,
                vec![simulation::STARTED_LOG.into()],
            ))
            .await?;

        tracing::info!("Run {} created for pipeline {}", run.id, pipeline_id);

        self.executor.submit(run.id, run.pipeline_id);

        Ok(run)
    }

    pub fn executor(&self) -> &RunExecutor {
        &self.executor
    }
}
