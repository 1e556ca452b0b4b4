//! Simulated ETL work
//!
//! Decides how a run ends and produces the log lines recorded for it.

use depot_core::domain::log::RunLogEntry;
use depot_core::domain::run::RunCompletion;
use rand::Rng;

/// Upper bound (exclusive) on rows reported by a successful run
pub const MAX_SIMULATED_ROWS: u32 = 1000;

/// Log line written when a run is triggered
pub const STARTED_LOG: &str = "[INFO] Pipeline execution started";

/// How a simulated execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedOutcome {
    Success { rows_processed: u32 },
    Failure,
}

/// Source of simulated outcomes
pub trait OutcomeSource: Send + Sync {
    fn draw(&self) -> SimulatedOutcome;
}

/// Weighted coin flip: succeeds with `success_rate` probability
#[derive(Debug, Clone, Copy)]
pub struct RandomOutcome {
    success_rate: f64,
}

impl RandomOutcome {
    /// `success_rate` is clamped to [0, 1]
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self { success_rate }
    }
}

impl OutcomeSource for RandomOutcome {
    fn draw(&self) -> SimulatedOutcome {
        let mut rng = rand::rng();
        if rng.random_bool(self.success_rate) {
            SimulatedOutcome::Success {
                rows_processed: rng.random_range(0..MAX_SIMULATED_ROWS),
            }
        } else {
            SimulatedOutcome::Failure
        }
    }
}

/// Builds the terminal write for an outcome
pub fn completion_for(outcome: SimulatedOutcome) -> RunCompletion {
    match outcome {
        SimulatedOutcome::Success { rows_processed } => RunCompletion::completed(
            rows_processed,
            vec![
                RunLogEntry::from(format!("[INFO] Extracted {} records", rows_processed)),
                "[INFO] Transformation successful".into(),
                "[INFO] Loaded to Data Warehouse".into(),
            ],
        ),
        SimulatedOutcome::Failure => RunCompletion::failed(vec![
            "[INFO] Starting extraction".into(),
            "[ERROR] Connection timeout to source system".into(),
            "[FATAL] Pipeline aborted".into(),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::domain::run::RunStatus;

    #[test]
    fn test_success_logs() {
        let completion = completion_for(SimulatedOutcome::Success { rows_processed: 321 });

        assert_eq!(completion.status(), RunStatus::Completed);
        assert_eq!(completion.rows_processed(), 321);
        assert_eq!(
            completion.logs(),
            &[
                RunLogEntry::from("[INFO] Extracted 321 records"),
                RunLogEntry::from("[INFO] Transformation successful"),
                RunLogEntry::from("[INFO] Loaded to Data Warehouse"),
            ]
        );
    }

    #[test]
    fn test_failure_logs() {
        let completion = completion_for(SimulatedOutcome::Failure);

        assert_eq!(completion.status(), RunStatus::Failed);
        assert_eq!(completion.rows_processed(), 0);
        assert_eq!(completion.logs().len(), 3);
        assert_eq!(
            completion.logs()[1],
            RunLogEntry::from("[ERROR] Connection timeout to source system")
        );
    }

    #[test]
    fn test_random_rows_in_range() {
        let source = RandomOutcome::new(1.0);
        for _ in 0..500 {
            match source.draw() {
                SimulatedOutcome::Success { rows_processed } => {
                    assert!(rows_processed < MAX_SIMULATED_ROWS)
                }
                SimulatedOutcome::Failure => panic!("success rate 1.0 must always succeed"),
            }
        }
    }

    #[test]
    fn test_zero_success_rate_always_fails() {
        let source = RandomOutcome::new(0.0);
        assert!((0..100).all(|_| source.draw() == SimulatedOutcome::Failure));
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(RandomOutcome::new(7.0).success_rate, 1.0);
        assert_eq!(RandomOutcome::new(-1.0).success_rate, 0.0);
        assert_eq!(RandomOutcome::new(f64::NAN).success_rate, 0.0);
    }
}
