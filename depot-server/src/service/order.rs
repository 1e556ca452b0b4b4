//! Order Service

use depot_core::domain::order::Order;
use depot_core::dto::order::CreateOrder;

use super::{Result, ServiceError};
use crate::repository::Store;

/// Place a new order
pub async fn create_order(store: &dyn Store, req: CreateOrder) -> Result<Order> {
    if req.quantity <= 0 {
        return Err(ServiceError::Validation(
            "Quantity must be greater than 0".to_string(),
        ));
    }

    if store.find_product(req.product_id).await?.is_none() {
        return Err(ServiceError::Validation(format!(
            "Product {} does not exist",
            req.product_id
        )));
    }

    let order = store.create_order(req).await?;

    tracing::info!("Order created: {} with status {}", order.id, order.status);

    Ok(order)
}

/// List orders, newest first
pub async fn list_orders(store: &dyn Store) -> Result<Vec<Order>> {
    Ok(store.list_orders().await?)
}
