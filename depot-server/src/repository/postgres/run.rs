//! Pipeline run queries

use async_trait::async_trait;
use depot_core::domain::log::RunLogEntry;
use depot_core::domain::run::{PipelineRun, RunCompletion, RunStatus};
use depot_core::dto::run::NewPipelineRun;

use super::PgStore;
use crate::repository::{RunRepository, StoreError, StoreResult};

#[async_trait]
impl RunRepository for PgStore {
    async fn create_run(&self, req: NewPipelineRun) -> StoreResult<PipelineRun> {
        let logs = serde_json::to_value(&req.logs)?;

        let row = sqlx::query_as::<_, RunRow>(
            r#"
            INSERT INTO pipeline_runs (pipeline_id, status, start_time, end_time, rows_processed, logs)
            VALUES ($1, $2, COALESCE($3, NOW()), $4, $5, $6)
            RETURNING id, pipeline_id, start_time, end_time, status, rows_processed, logs
            "#,
        )
        .bind(req.pipeline_id)
        .bind(req.status.as_str())
        .bind(req.start_time)
        .bind(req.end_time)
        .bind(req.rows_processed)
        .bind(logs)
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }

    async fn find_run(&self, id: i64) -> StoreResult<Option<PipelineRun>> {
        let row = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, pipeline_id, start_time, end_time, status, rows_processed, logs
            FROM pipeline_runs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(PipelineRun::try_from).transpose()
    }

    async fn list_runs_for_pipeline(&self, pipeline_id: i64) -> StoreResult<Vec<PipelineRun>> {
        let rows = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, pipeline_id, start_time, end_time, status, rows_processed, logs
            FROM pipeline_runs
            WHERE pipeline_id = $1
            ORDER BY start_time DESC, id DESC
            "#,
        )
        .bind(pipeline_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(PipelineRun::try_from).collect()
    }

    async fn recent_runs(&self, limit: i64) -> StoreResult<Vec<PipelineRun>> {
        let rows = sqlx::query_as::<_, RunRow>(
            r#"
            SELECT id, pipeline_id, start_time, end_time, status, rows_processed, logs
            FROM pipeline_runs
            ORDER BY start_time DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(PipelineRun::try_from).collect()
    }

    async fn count_runs_by_status(&self, status: RunStatus) -> StoreResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pipeline_runs WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(self.pool())
                .await?;
        Ok(count)
    }

    async fn complete_run(
        &self,
        id: i64,
        completion: &RunCompletion,
    ) -> StoreResult<Option<PipelineRun>> {
        let logs = serde_json::to_value(completion.logs())?;

        let row = sqlx::query_as::<_, RunRow>(
            r#"
            UPDATE pipeline_runs
            SET status = $1, end_time = $2, rows_processed = $3, logs = $4
            WHERE id = $5 AND status = $6
            RETURNING id, pipeline_id, start_time, end_time, status, rows_processed, logs
            "#,
        )
        .bind(completion.status().as_str())
        .bind(completion.end_time())
        .bind(completion.rows_processed())
        .bind(logs)
        .bind(id)
        .bind(RunStatus::Running.as_str())
        .fetch_optional(self.pool())
        .await?;

        row.map(PipelineRun::try_from).transpose()
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct RunRow {
    id: i64,
    pipeline_id: i64,
    start_time: chrono::DateTime<chrono::Utc>,
    end_time: Option<chrono::DateTime<chrono::Utc>>,
    status: String,
    rows_processed: i32,
    logs: serde_json::Value,
}

impl TryFrom<RunRow> for PipelineRun {
    type Error = StoreError;

    fn try_from(row: RunRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RunStatus>()
            .map_err(|e| StoreError::InvalidRow(format!("run {}: {}", row.id, e)))?;

        let logs: Vec<RunLogEntry> = match row.logs {
            serde_json::Value::Null => Vec::new(),
            value => serde_json::from_value(value)
                .map_err(|e| StoreError::InvalidRow(format!("run {} logs: {}", row.id, e)))?,
        };

        Ok(PipelineRun {
            id: row.id,
            pipeline_id: row.pipeline_id,
            start_time: row.start_time,
            end_time: row.end_time,
            status,
            rows_processed: row.rows_processed,
            logs,
        })
    }
}
