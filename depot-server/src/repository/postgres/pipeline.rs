//! Pipeline queries

use async_trait::async_trait;
use depot_core::domain::pipeline::{Pipeline, PipelineKind};
use depot_core::dto::pipeline::CreatePipeline;

use super::PgStore;
use crate::repository::{PipelineRepository, StoreError, StoreResult};

#[async_trait]
impl PipelineRepository for PgStore {
    async fn list_pipelines(&self) -> StoreResult<Vec<Pipeline>> {
        let rows = sqlx::query_as::<_, PipelineRow>(
            r#"
            SELECT id, name, description, schedule, type, created_at
            FROM pipelines
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Pipeline::try_from).collect()
    }

    async fn find_pipeline(&self, id: i64) -> StoreResult<Option<Pipeline>> {
        let row = sqlx::query_as::<_, PipelineRow>(
            r#"
            SELECT id, name, description, schedule, type, created_at
            FROM pipelines
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Pipeline::try_from).transpose()
    }

    async fn create_pipeline(&self, req: CreatePipeline) -> StoreResult<Pipeline> {
        let row = sqlx::query_as::<_, PipelineRow>(
            r#"
            INSERT INTO pipelines (name, description, schedule, type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, schedule, type, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.schedule)
        .bind(req.kind.as_str())
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }
}

#[derive(sqlx::FromRow)]
struct PipelineRow {
    id: i64,
    name: String,
    description: String,
    schedule: Option<String>,
    #[sqlx(rename = "type")]
    kind: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<PipelineRow> for Pipeline {
    type Error = StoreError;

    fn try_from(row: PipelineRow) -> Result<Self, Self::Error> {
        let kind = row
            .kind
            .parse::<PipelineKind>()
            .map_err(|e| StoreError::InvalidRow(format!("pipeline {}: {}", row.id, e)))?;

        Ok(Pipeline {
            id: row.id,
            name: row.name,
            description: row.description,
            schedule: row.schedule,
            kind,
            created_at: row.created_at,
        })
    }
}
