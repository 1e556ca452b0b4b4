//! Supplier queries

use async_trait::async_trait;
use depot_core::domain::supplier::Supplier;
use depot_core::dto::supplier::CreateSupplier;

use super::PgStore;
use crate::repository::{StoreResult, SupplierRepository};

const DEFAULT_RELIABILITY_SCORE: &str = "1.0";

#[async_trait]
impl SupplierRepository for PgStore {
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, location, contact_email, type, reliability_score, created_at
            FROM suppliers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    async fn create_supplier(&self, req: CreateSupplier) -> StoreResult<Supplier> {
        let score = req
            .reliability_score
            .unwrap_or_else(|| DEFAULT_RELIABILITY_SCORE.to_string());

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, location, contact_email, type, reliability_score)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, location, contact_email, type, reliability_score, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.location)
        .bind(&req.contact_email)
        .bind(&req.supplier_type)
        .bind(&score)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }

    async fn count_suppliers(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM suppliers")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: i64,
    name: String,
    location: String,
    contact_email: String,
    #[sqlx(rename = "type")]
    supplier_type: String,
    reliability_score: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            location: row.location,
            contact_email: row.contact_email,
            supplier_type: row.supplier_type,
            reliability_score: row.reliability_score,
            created_at: row.created_at,
        }
    }
}
