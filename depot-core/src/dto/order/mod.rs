//! Order DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::OrderStatus;

/// Request to place a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub product_id: i64,
    pub quantity: i32,
    pub status: OrderStatus,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
}
