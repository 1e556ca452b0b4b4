//! Run executor
//!
//! Bounded worker pool for detached run executions. Each submitted run waits
//! for a permit, performs its simulated work, then writes its terminal state
//! once, retrying the write with exponential backoff. Runs whose write keeps
//! failing are recorded as dead letters.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use depot_core::domain::run::{RunCompletion, RunStatus};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

use super::EngineSettings;
use super::simulation::{OutcomeSource, completion_for};
use crate::repository::Store;

/// A run whose terminal state could not be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct DeadLetter {
    pub run_id: i64,
    pub pipeline_id: i64,
    /// The status the run would have reached
    pub intended_status: RunStatus,
    pub attempts: u32,
    pub last_error: String,
    pub recorded_at: DateTime<Utc>,
}

/// Bookkeeping for a submitted run
#[derive(Debug, Clone, Copy)]
struct RunTicket {
    pipeline_id: i64,
    submitted_at: DateTime<Utc>,
}

/// Worker pool executing pipeline runs, keyed by run id
#[derive(Clone)]
pub struct RunExecutor {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn Store>,
    outcomes: Arc<dyn OutcomeSource>,
    settings: EngineSettings,
    permits: Arc<Semaphore>,
    in_flight: DashMap<i64, RunTicket>,
    dead_letters: Mutex<Vec<DeadLetter>>,
}

/// Removes a run from the in-flight map when its task ends, even on panic
struct InFlightGuard {
    inner: Arc<Inner>,
    run_id: i64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Some((_, ticket)) = self.inner.in_flight.remove(&self.run_id) {
            let elapsed = Utc::now() - ticket.submitted_at;
            debug!(
                "Run {} (pipeline {}) left the pool after {} ms",
                self.run_id,
                ticket.pipeline_id,
                elapsed.num_milliseconds()
            );
        }
    }
}

impl RunExecutor {
    pub fn new(
        store: Arc<dyn Store>,
        outcomes: Arc<dyn OutcomeSource>,
        settings: EngineSettings,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(settings.max_concurrent_runs));
        Self {
            inner: Arc::new(Inner {
                store,
                outcomes,
                settings,
                permits,
                in_flight: DashMap::new(),
                dead_letters: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Schedules the execution of a run that was just created `Running`
    pub fn submit(&self, run_id: i64, pipeline_id: i64) {
        self.inner.in_flight.insert(
            run_id,
            RunTicket {
                pipeline_id,
                submitted_at: Utc::now(),
            },
        );

        let guard = InFlightGuard {
            inner: Arc::clone(&self.inner),
            run_id,
        };

        tokio::spawn(async move {
            let inner = Arc::clone(&guard.inner);
            inner.execute(run_id, pipeline_id).await;
            drop(guard);
        });
    }

    /// Ids of runs submitted and not yet finished, ascending
    pub fn in_flight(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.inner.in_flight.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.inner
            .dead_letters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Waits until no run is in flight or `timeout` elapses.
    ///
    /// Returns `true` if the pool drained in time.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut ticker = time::interval(Duration::from_millis(25));

        loop {
            ticker.tick().await;

            if self.inner.in_flight.is_empty() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
        }
    }
}

impl Inner {
    async fn execute(&self, run_id: i64, pipeline_id: i64) {
        let _permit = match Arc::clone(&self.permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Worker pool closed, run {} will not execute", run_id);
                return;
            }
        };

        info!("Executing run {} of pipeline {}", run_id, pipeline_id);

        time::sleep(self.settings.run_duration).await;

        let outcome = self.outcomes.draw();
        debug!("Run {} outcome: {:?}", run_id, outcome);

        self.persist(run_id, pipeline_id, completion_for(outcome))
            .await;
    }

    async fn persist(
        &self,
        run_id: i64,
        pipeline_id: i64,
        completion: RunCompletion,
    ) {
        let policy = &self.settings.write_retry;
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.store.complete_run(run_id, &completion).await {
                Ok(Some(run)) => {
                    info!(
                        "Pipeline {} run {} finished with status {} ({} rows)",
                        pipeline_id, run_id, run.status, run.rows_processed
                    );
                    return;
                }
                Ok(None) => {
                    warn!(
                        "Run {} is no longer running, terminal write not applied",
                        run_id
                    );
                    return;
                }
                Err(e) if attempt < policy.max_attempts => {
                    let delay = policy.backoff_for(attempt);
                    warn!(
                        "Failed to finish run {} (attempt {}/{}): {}",
                        run_id, attempt, policy.max_attempts, e
                    );
                    warn!("Retrying in {} ms...", delay.as_millis());
                    time::sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        "Giving up on run {} after {} attempt(s), run stays Running: {}",
                        run_id, attempt, e
                    );
                    self.dead_letters
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(DeadLetter {
                            run_id,
                            pipeline_id,
                            intended_status: completion.status(),
                            attempts: attempt,
                            last_error: e.to_string(),
                            recorded_at: Utc::now(),
                        });
                    return;
                }
            }
        }
    }
}
