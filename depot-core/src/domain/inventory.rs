//! Inventory domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock of one product held at a warehouse location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub warehouse_location: String,
    pub min_stock_level: i32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Quantity is strictly below the configured minimum
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_stock_level
    }
}
