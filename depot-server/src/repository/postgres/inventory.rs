//! Inventory queries

use async_trait::async_trait;
use depot_core::domain::inventory::InventoryItem;
use depot_core::domain::product::Product;
use depot_core::dto::inventory::{CreateInventoryItem, InventoryWithProduct, UpdateInventoryItem};

use super::PgStore;
use crate::repository::{InventoryRepository, StoreResult};

#[async_trait]
impl InventoryRepository for PgStore {
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryWithProduct>> {
        let rows = sqlx::query_as::<_, InventoryWithProductRow>(
            r#"
            SELECT i.id, i.product_id, i.quantity, i.warehouse_location,
                   i.min_stock_level, i.last_updated,
                   p.name AS product_name, p.sku AS product_sku,
                   p.category AS product_category, p.unit_price AS product_unit_price,
                   p.supplier_id AS product_supplier_id, p.created_at AS product_created_at
            FROM inventory i
            INNER JOIN products p ON p.id = i.product_id
            ORDER BY i.id ASC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(InventoryWithProduct::from).collect())
    }

    async fn find_inventory_item(&self, id: i64) -> StoreResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT id, product_id, quantity, warehouse_location, min_stock_level, last_updated
            FROM inventory
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    async fn create_inventory_item(&self, req: CreateInventoryItem) -> StoreResult<InventoryItem> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            INSERT INTO inventory (product_id, quantity, warehouse_location, min_stock_level)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, quantity, warehouse_location, min_stock_level, last_updated
            "#,
        )
        .bind(req.product_id)
        .bind(req.quantity)
        .bind(&req.warehouse_location)
        .bind(req.min_stock_level)
        .fetch_one(self.pool())
        .await?;

        Ok(row.into())
    }

    async fn update_inventory_item(
        &self,
        id: i64,
        req: UpdateInventoryItem,
    ) -> StoreResult<Option<InventoryItem>> {
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            UPDATE inventory
            SET product_id = COALESCE($1, product_id),
                quantity = COALESCE($2, quantity),
                warehouse_location = COALESCE($3, warehouse_location),
                min_stock_level = COALESCE($4, min_stock_level),
                last_updated = NOW()
            WHERE id = $5
            RETURNING id, product_id, quantity, warehouse_location, min_stock_level, last_updated
            "#,
        )
        .bind(req.product_id)
        .bind(req.quantity)
        .bind(&req.warehouse_location)
        .bind(req.min_stock_level)
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(InventoryItem::from))
    }

    async fn count_low_stock(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory WHERE quantity < min_stock_level",
        )
        .fetch_one(self.pool())
        .await?;
        Ok(count)
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: i64,
    product_id: i64,
    quantity: i32,
    warehouse_location: String,
    min_stock_level: i32,
    last_updated: chrono::DateTime<chrono::Utc>,
}

impl From<InventoryRow> for InventoryItem {
    fn from(row: InventoryRow) -> Self {
        InventoryItem {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            warehouse_location: row.warehouse_location,
            min_stock_level: row.min_stock_level,
            last_updated: row.last_updated,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InventoryWithProductRow {
    id: i64,
    product_id: i64,
    quantity: i32,
    warehouse_location: String,
    min_stock_level: i32,
    last_updated: chrono::DateTime<chrono::Utc>,
    product_name: String,
    product_sku: String,
    product_category: String,
    product_unit_price: String,
    product_supplier_id: Option<i64>,
    product_created_at: chrono::DateTime<chrono::Utc>,
}

impl From<InventoryWithProductRow> for InventoryWithProduct {
    fn from(row: InventoryWithProductRow) -> Self {
        InventoryWithProduct {
            item: InventoryItem {
                id: row.id,
                product_id: row.product_id,
                quantity: row.quantity,
                warehouse_location: row.warehouse_location,
                min_stock_level: row.min_stock_level,
                last_updated: row.last_updated,
            },
            product: Product {
                id: row.product_id,
                name: row.product_name,
                sku: row.product_sku,
                category: row.product_category,
                unit_price: row.product_unit_price,
                supplier_id: row.product_supplier_id,
                created_at: row.product_created_at,
            },
        }
    }
}
