//! Inventory DTOs

use serde::{Deserialize, Serialize};

use crate::domain::inventory::InventoryItem;
use crate::domain::product::Product;

fn default_min_stock_level() -> i32 {
    100
}

/// Request to create an inventory row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItem {
    pub product_id: i64,
    #[serde(default)]
    pub quantity: i32,
    pub warehouse_location: String,
    #[serde(default = "default_min_stock_level")]
    pub min_stock_level: i32,
}

/// Partial update of an inventory row; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryItem {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub warehouse_location: Option<String>,
    #[serde(default)]
    pub min_stock_level: Option<i32>,
}

impl UpdateInventoryItem {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.quantity.is_none()
            && self.warehouse_location.is_none()
            && self.min_stock_level.is_none()
    }
}

/// Inventory row joined with its product, as listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryWithProduct {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let req: CreateInventoryItem =
            serde_json::from_str(r#"{"productId": 3, "warehouseLocation": "Zone C-Secure"}"#)
                .unwrap();
        assert_eq!(req.quantity, 0);
        assert_eq!(req.min_stock_level, 100);
    }

    #[test]
    fn test_partial_update() {
        let req: UpdateInventoryItem = serde_json::from_str(r#"{"quantity": 750}"#).unwrap();
        assert_eq!(req.quantity, Some(750));
        assert!(req.warehouse_location.is_none());
        assert!(!req.is_empty());
        assert!(UpdateInventoryItem::default().is_empty());
    }
}
