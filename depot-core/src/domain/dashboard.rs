//! Dashboard domain types

use serde::{Deserialize, Serialize};

/// Aggregated figures shown on the dashboard landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_suppliers: i64,
    pub total_products: i64,
    pub low_stock_items: i64,
    pub pending_orders: i64,
    /// Runs currently `Running`, not distinct pipelines
    pub active_pipelines: i64,
    /// Success percentage over the most recent runs
    pub pipeline_health: u32,
}
