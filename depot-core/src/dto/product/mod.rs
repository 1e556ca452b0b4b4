//! Product DTOs

use serde::{Deserialize, Serialize};

/// Request to create a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub category: String,
    pub unit_price: String,
    #[serde(default)]
    pub supplier_id: Option<i64>,
}
