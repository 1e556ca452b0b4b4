//! Supplier domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company that manufactures or distributes products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub contact_email: String,
    /// Manufacturer, Distributor, Wholesaler, ...
    #[serde(rename = "type")]
    pub supplier_type: String,
    /// Decimal string between 0.0 and 1.0
    pub reliability_score: String,
    pub created_at: DateTime<Utc>,
}
