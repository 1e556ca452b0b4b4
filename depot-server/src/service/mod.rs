//! Service Module
//!
//! Business logic layer for the server.
//! Services validate requests and orchestrate calls to the record store.

pub mod dashboard;
pub mod inventory;
pub mod order;
pub mod pipeline;
pub mod product;
pub mod seed;
pub mod supplier;

use thiserror::Error;

use crate::repository::StoreError;

// Re-export for convenience
pub use dashboard::DashboardAggregator;
pub use inventory as inventory_service;
pub use order as order_service;
pub use pipeline as pipeline_service;
pub use product as product_service;
pub use supplier as supplier_service;

/// Service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Rejects blank required text fields
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Rejects strings that do not parse as a non-negative decimal
pub(crate) fn require_decimal(field: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(parsed),
        _ => Err(ServiceError::Validation(format!(
            "{} must be a non-negative decimal",
            field
        ))),
    }
}
