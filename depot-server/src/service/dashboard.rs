//! Dashboard Aggregator
//!
//! Computes the landing-page statistics from five independent store reads.
//! The reads are not wrapped in a transaction, so under concurrent writes the
//! figures may each reflect a slightly different instant.

use depot_core::domain::dashboard::DashboardStats;
use depot_core::domain::order::OrderStatus;
use depot_core::domain::run::{PipelineRun, RunStatus};
use std::sync::Arc;

use super::Result;
use crate::repository::Store;

/// Number of most recent runs considered for pipeline health
pub const HEALTH_WINDOW: i64 = 10;

pub struct DashboardAggregator {
    store: Arc<dyn Store>,
}

impl DashboardAggregator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn compute_stats(&self) -> Result<DashboardStats> {
        let total_suppliers = self.store.count_suppliers().await?;
        let total_products = self.store.count_products().await?;
        let pending_orders = self
            .store
            .count_orders_by_status(OrderStatus::Pending)
            .await?;
        let active_pipelines = self.store.count_runs_by_status(RunStatus::Running).await?;
        let low_stock_items = self.store.count_low_stock().await?;

        let recent = self.store.recent_runs(HEALTH_WINDOW).await?;

        Ok(DashboardStats {
            total_suppliers,
            total_products,
            low_stock_items,
            pending_orders,
            active_pipelines,
            pipeline_health: pipeline_health(&recent),
        })
    }
}

/// Percentage of `Completed` runs, rounded half up; 100 for no runs
pub fn pipeline_health(runs: &[PipelineRun]) -> u32 {
    if runs.is_empty() {
        return 100;
    }

    let completed = runs
        .iter()
        .filter(|r| r.status == RunStatus::Completed)
        .count();

    (completed as f64 / runs.len() as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InventoryRepository, MemoryStore, OrderRepository, RunRepository};
    use chrono::{Duration, Utc};
    use depot_core::dto::inventory::CreateInventoryItem;
    use depot_core::dto::order::CreateOrder;
    use depot_core::dto::run::NewPipelineRun;

    fn historical(minutes_ago: i64, status: RunStatus) -> NewPipelineRun {
        let start = Utc::now() - Duration::minutes(minutes_ago);
        NewPipelineRun {
            pipeline_id: 1,
            status,
            start_time: Some(start),
            end_time: status.is_terminal().then(|| start + Duration::seconds(5)),
            rows_processed: 0,
            logs: vec![],
        }
    }

    fn aggregator(store: Arc<MemoryStore>) -> DashboardAggregator {
        DashboardAggregator::new(store)
    }

    #[tokio::test]
    async fn test_empty_history_is_fully_healthy() {
        let stats = aggregator(Arc::new(MemoryStore::new()))
            .compute_stats()
            .await
            .unwrap();

        assert_eq!(stats.pipeline_health, 100);
        assert_eq!(stats.active_pipelines, 0);
        assert_eq!(stats.total_suppliers, 0);
    }

    #[tokio::test]
    async fn test_oldest_failure_outside_window() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_run(historical(100, RunStatus::Failed))
            .await
            .unwrap();
        for minutes_ago in 1..=10 {
            store
                .create_run(historical(minutes_ago, RunStatus::Completed))
                .await
                .unwrap();
        }

        let stats = aggregator(store).compute_stats().await.unwrap();
        assert_eq!(stats.pipeline_health, 100);
    }

    #[tokio::test]
    async fn test_recent_failure_inside_window() {
        let store = Arc::new(MemoryStore::new());
        for minutes_ago in 2..=11 {
            store
                .create_run(historical(minutes_ago, RunStatus::Completed))
                .await
                .unwrap();
        }
        store
            .create_run(historical(1, RunStatus::Failed))
            .await
            .unwrap();

        let stats = aggregator(store).compute_stats().await.unwrap();
        assert_eq!(stats.pipeline_health, 90);
    }

    #[tokio::test]
    async fn test_running_runs_count_as_active_and_unhealthy() {
        let store = Arc::new(MemoryStore::new());
        store
            .create_run(historical(3, RunStatus::Completed))
            .await
            .unwrap();
        store
            .create_run(historical(2, RunStatus::Running))
            .await
            .unwrap();
        store
            .create_run(historical(1, RunStatus::Running))
            .await
            .unwrap();

        let stats = aggregator(store).compute_stats().await.unwrap();
        assert_eq!(stats.active_pipelines, 2);
        assert_eq!(stats.pipeline_health, 33);
    }

    #[tokio::test]
    async fn test_low_stock_count() {
        let store = Arc::new(MemoryStore::new());
        for (quantity, min_stock_level) in [(200, 500), (50_000, 10_000)] {
            store
                .create_inventory_item(CreateInventoryItem {
                    product_id: 1,
                    quantity,
                    warehouse_location: "Zone A-12".to_string(),
                    min_stock_level,
                })
                .await
                .unwrap();
        }

        let stats = aggregator(store).compute_stats().await.unwrap();
        assert_eq!(stats.low_stock_items, 1);
    }

    #[tokio::test]
    async fn test_pending_order_count() {
        let store = Arc::new(MemoryStore::new());
        for status in [OrderStatus::Pending, OrderStatus::Pending, OrderStatus::Shipped] {
            store
                .create_order(CreateOrder {
                    product_id: 1,
                    quantity: 1000,
                    status,
                    delivery_date: None,
                })
                .await
                .unwrap();
        }

        let stats = aggregator(store).compute_stats().await.unwrap();
        assert_eq!(stats.pending_orders, 2);
    }

    #[test]
    fn test_health_rounds_half_up() {
        let runs: Vec<PipelineRun> = (0..8)
            .map(|i| PipelineRun {
                id: i,
                pipeline_id: 1,
                start_time: Utc::now(),
                end_time: None,
                status: if i == 0 {
                    RunStatus::Completed
                } else {
                    RunStatus::Failed
                },
                rows_processed: 0,
                logs: vec![],
            })
            .collect();

        // 1 of 8 is 12.5%
        assert_eq!(pipeline_health(&runs), 13);
    }
}
