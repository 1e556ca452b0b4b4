//! Inventory Service

use depot_core::domain::inventory::InventoryItem;
use depot_core::dto::inventory::{CreateInventoryItem, InventoryWithProduct, UpdateInventoryItem};

use super::{Result, ServiceError, require_text};
use crate::repository::Store;

/// List inventory rows with their products
pub async fn list_inventory(store: &dyn Store) -> Result<Vec<InventoryWithProduct>> {
    Ok(store.list_inventory().await?)
}

/// Add an inventory row for an existing product
pub async fn create_inventory_item(
    store: &dyn Store,
    req: CreateInventoryItem,
) -> Result<InventoryItem> {
    require_text("Warehouse location", &req.warehouse_location)?;
    validate_levels(Some(req.quantity), Some(req.min_stock_level))?;
    ensure_product_exists(store, req.product_id).await?;

    let item = store.create_inventory_item(req).await?;

    tracing::info!(
        "Inventory item created: {} (product {})",
        item.id,
        item.product_id
    );

    Ok(item)
}

/// Apply a partial update to an inventory row
pub async fn update_inventory_item(
    store: &dyn Store,
    id: i64,
    req: UpdateInventoryItem,
) -> Result<InventoryItem> {
    if let Some(location) = &req.warehouse_location {
        require_text("Warehouse location", location)?;
    }
    validate_levels(req.quantity, req.min_stock_level)?;
    if let Some(product_id) = req.product_id {
        ensure_product_exists(store, product_id).await?;
    }

    let item = store
        .update_inventory_item(id, req)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Inventory item not found".to_string()))?;

    tracing::info!("Inventory item updated: {}", item.id);

    Ok(item)
}

fn validate_levels(quantity: Option<i32>, min_stock_level: Option<i32>) -> Result<()> {
    if quantity.is_some_and(|q| q < 0) {
        return Err(ServiceError::Validation(
            "Quantity cannot be negative".to_string(),
        ));
    }
    if min_stock_level.is_some_and(|m| m < 0) {
        return Err(ServiceError::Validation(
            "Minimum stock level cannot be negative".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_product_exists(store: &dyn Store, product_id: i64) -> Result<()> {
    if store.find_product(product_id).await?.is_none() {
        return Err(ServiceError::Validation(format!(
            "Product {} does not exist",
            product_id
        )));
    }
    Ok(())
}
