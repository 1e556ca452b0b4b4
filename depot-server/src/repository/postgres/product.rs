//! Product queries

use async_trait::async_trait;
use depot_core::domain::product::Product;
use depot_core::dto::product::CreateProduct;

use super::{PgStore, conflict_or_database};
use crate::repository::{ProductRepository, StoreResult};

#[async_trait]
impl ProductRepository for PgStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, sku, category, unit_price, supplier_id, created_at
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, sku, category, unit_price, supplier_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_product_by_sku(&self, sku: &str) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, sku, category, unit_price, supplier_id, created_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn create_product(&self, req: CreateProduct) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, sku, category, unit_price, supplier_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, sku, category, unit_price, supplier_id, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.sku)
        .bind(&req.category)
        .bind(&req.unit_price)
        .bind(req.supplier_id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| conflict_or_database(e, &format!("Product with SKU {}", req.sku)))?;

        Ok(row.into())
    }

    async fn count_products(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    sku: String,
    category: String,
    unit_price: String,
    supplier_id: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            sku: row.sku,
            category: row.category,
            unit_price: row.unit_price,
            supplier_id: row.supplier_id,
            created_at: row.created_at,
        }
    }
}
