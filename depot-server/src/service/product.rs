//! Product Service

use depot_core::domain::product::Product;
use depot_core::dto::product::CreateProduct;

use super::{Result, ServiceError, require_decimal, require_text};
use crate::repository::Store;

/// Create a new product
pub async fn create_product(store: &dyn Store, req: CreateProduct) -> Result<Product> {
    validate_product_request(&req)?;

    if store.find_product_by_sku(&req.sku).await?.is_some() {
        return Err(ServiceError::Validation(format!(
            "Product with SKU {} already exists",
            req.sku
        )));
    }

    if let Some(supplier_id) = req.supplier_id {
        let known = store
            .list_suppliers()
            .await?
            .iter()
            .any(|s| s.id == supplier_id);
        if !known {
            return Err(ServiceError::Validation(format!(
                "Supplier {} does not exist",
                supplier_id
            )));
        }
    }

    let product = store.create_product(req).await?;

    tracing::info!("Product created: {} ({})", product.sku, product.id);

    Ok(product)
}

/// Get a product by ID
pub async fn get_product(store: &dyn Store, id: i64) -> Result<Product> {
    store
        .find_product(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))
}

/// List all products
pub async fn list_products(store: &dyn Store) -> Result<Vec<Product>> {
    Ok(store.list_products().await?)
}

fn validate_product_request(req: &CreateProduct) -> Result<()> {
    require_text("Name", &req.name)?;
    require_text("SKU", &req.sku)?;
    require_text("Category", &req.category)?;
    require_decimal("Unit price", &req.unit_price)?;
    Ok(())
}
