//! Supplier Service

use depot_core::domain::supplier::Supplier;
use depot_core::dto::supplier::CreateSupplier;

use super::{Result, ServiceError, require_decimal, require_text};
use crate::repository::Store;

/// Create a new supplier
pub async fn create_supplier(store: &dyn Store, req: CreateSupplier) -> Result<Supplier> {
    validate_supplier_request(&req)?;

    let supplier = store.create_supplier(req).await?;

    tracing::info!("Supplier created: {} ({})", supplier.name, supplier.id);

    Ok(supplier)
}

/// List all suppliers
pub async fn list_suppliers(store: &dyn Store) -> Result<Vec<Supplier>> {
    Ok(store.list_suppliers().await?)
}

fn validate_supplier_request(req: &CreateSupplier) -> Result<()> {
    require_text("Name", &req.name)?;
    require_text("Location", &req.location)?;
    require_text("Type", &req.supplier_type)?;

    if !req.contact_email.contains('@') {
        return Err(ServiceError::Validation(
            "Contact email must be a valid email address".to_string(),
        ));
    }

    if let Some(score) = &req.reliability_score {
        let parsed = require_decimal("Reliability score", score)?;
        if parsed > 1.0 {
            return Err(ServiceError::Validation(
                "Reliability score must be between 0.0 and 1.0".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateSupplier {
        CreateSupplier {
            name: "MedLife Pharmaceuticals".to_string(),
            location: "New York, USA".to_string(),
            contact_email: "supply@medlife.com".to_string(),
            supplier_type: "Manufacturer".to_string(),
            reliability_score: Some("0.98".to_string()),
        }
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(validate_supplier_request(&request()).is_ok());
    }

    #[test]
    fn test_validate_bad_email() {
        let mut req = request();
        req.contact_email = "supply.medlife.com".to_string();
        assert!(matches!(
            validate_supplier_request(&req),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_score_out_of_range() {
        let mut req = request();
        req.reliability_score = Some("1.5".to_string());
        assert!(validate_supplier_request(&req).is_err());
    }
}
