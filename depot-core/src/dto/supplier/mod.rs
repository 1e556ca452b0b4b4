//! Supplier DTOs

use serde::{Deserialize, Serialize};

/// Request to create a new supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    pub name: String,
    pub location: String,
    pub contact_email: String,
    #[serde(rename = "type")]
    pub supplier_type: String,
    /// Defaults to "1.0" when omitted
    #[serde(default)]
    pub reliability_score: Option<String>,
}
