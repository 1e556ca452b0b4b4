//! Product domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogue item with a unique SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: String,
    /// Decimal string, e.g. "15000.00"
    pub unit_price: String,
    pub supplier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
