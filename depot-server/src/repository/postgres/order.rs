//! Order queries

use async_trait::async_trait;
use depot_core::domain::order::{Order, OrderStatus};
use depot_core::dto::order::CreateOrder;

use super::PgStore;
use crate::repository::{OrderRepository, StoreError, StoreResult};

#[async_trait]
impl OrderRepository for PgStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, product_id, quantity, status, order_date, delivery_date
            FROM orders
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn create_order(&self, req: CreateOrder) -> StoreResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (product_id, quantity, status, delivery_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, quantity, status, order_date, delivery_date
            "#,
        )
        .bind(req.product_id)
        .bind(req.quantity)
        .bind(req.status.as_str())
        .bind(req.delivery_date)
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }

    async fn count_orders_by_status(&self, status: OrderStatus) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    product_id: i64,
    quantity: i32,
    status: String,
    order_date: chrono::DateTime<chrono::Utc>,
    delivery_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::InvalidRow(format!("order {}: {}", row.id, e)))?;

        Ok(Order {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            status,
            order_date: row.order_date,
            delivery_date: row.delivery_date,
        })
    }
}
