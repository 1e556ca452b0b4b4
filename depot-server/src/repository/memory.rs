//! In-memory record store
//!
//! Keeps every table in a `Vec` behind a mutex. Ids are assigned
//! sequentially per table starting at 1; rows are never deleted.

use async_trait::async_trait;
use chrono::Utc;
use depot_core::domain::inventory::InventoryItem;
use depot_core::domain::order::{Order, OrderStatus};
use depot_core::domain::pipeline::Pipeline;
use depot_core::domain::product::Product;
use depot_core::domain::run::{PipelineRun, RunCompletion, RunStatus};
use depot_core::domain::supplier::Supplier;
use depot_core::dto::inventory::{CreateInventoryItem, InventoryWithProduct, UpdateInventoryItem};
use depot_core::dto::order::CreateOrder;
use depot_core::dto::pipeline::CreatePipeline;
use depot_core::dto::product::CreateProduct;
use depot_core::dto::run::NewPipelineRun;
use depot_core::dto::supplier::CreateSupplier;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    InventoryRepository, OrderRepository, PipelineRepository, ProductRepository, RunRepository,
    StoreError, StoreResult, SupplierRepository,
};

#[derive(Default)]
struct Tables {
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
    inventory: Vec<InventoryItem>,
    orders: Vec<Order>,
    pipelines: Vec<Pipeline>,
    runs: Vec<PipelineRun>,
}

fn next_id<T>(rows: &[T]) -> i64 {
    rows.len() as i64 + 1
}

/// Record store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    #[cfg(test)]
    failing_completions: std::sync::atomic::AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes the next `count` calls to `complete_run` fail
    #[cfg(test)]
    pub(crate) fn fail_next_completions(&self, count: u32) {
        self.failing_completions
            .store(count, std::sync::atomic::Ordering::SeqCst);
    }

    #[cfg(test)]
    fn take_injected_failure(&self) -> bool {
        use std::sync::atomic::Ordering;
        self.failing_completions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    #[cfg(not(test))]
    fn take_injected_failure(&self) -> bool {
        false
    }
}

fn most_recent_first(runs: &mut [PipelineRun]) {
    runs.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl SupplierRepository for MemoryStore {
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        Ok(self.tables().suppliers.clone())
    }

    async fn create_supplier(&self, req: CreateSupplier) -> StoreResult<Supplier> {
        let mut tables = self.tables();
        let supplier = Supplier {
            id: next_id(&tables.suppliers),
            name: req.name,
            location: req.location,
            contact_email: req.contact_email,
            supplier_type: req.supplier_type,
            reliability_score: req.reliability_score.unwrap_or_else(|| "1.0".to_string()),
            created_at: Utc::now(),
        };
        tables.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn count_suppliers(&self) -> StoreResult<i64> {
        Ok(self.tables().suppliers.len() as i64)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.tables().products.clone())
    }

    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.tables().products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_product_by_sku(&self, sku: &str) -> StoreResult<Option<Product>> {
        Ok(self.tables().products.iter().find(|p| p.sku == sku).cloned())
    }

    async fn create_product(&self, req: CreateProduct) -> StoreResult<Product> {
        let mut tables = self.tables();
        if tables.products.iter().any(|p| p.sku == req.sku) {
            return Err(StoreError::Conflict(format!(
                "Product with SKU {} already exists",
                req.sku
            )));
        }

        let product = Product {
            id: next_id(&tables.products),
            name: req.name,
            sku: req.sku,
            category: req.category,
            unit_price: req.unit_price,
            supplier_id: req.supplier_id,
            created_at: Utc::now(),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn count_products(&self) -> StoreResult<i64> {
        Ok(self.tables().products.len() as i64)
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryWithProduct>> {
        let tables = self.tables();
        let listing = tables
            .inventory
            .iter()
            .filter_map(|item| {
                tables
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .map(|product| InventoryWithProduct {
                        item: item.clone(),
                        product: product.clone(),
                    })
            })
            .collect();
        Ok(listing)
    }

    async fn find_inventory_item(&self, id: i64) -> StoreResult<Option<InventoryItem>> {
        Ok(self.tables().inventory.iter().find(|i| i.id == id).cloned())
    }

    async fn create_inventory_item(&self, req: CreateInventoryItem) -> StoreResult<InventoryItem> {
        let mut tables = self.tables();
        let item = InventoryItem {
            id: next_id(&tables.inventory),
            product_id: req.product_id,
            quantity: req.quantity,
            warehouse_location: req.warehouse_location,
            min_stock_level: req.min_stock_level,
            last_updated: Utc::now(),
        };
        tables.inventory.push(item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        id: i64,
        req: UpdateInventoryItem,
    ) -> StoreResult<Option<InventoryItem>> {
        let mut tables = self.tables();
        let Some(item) = tables.inventory.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };

        if let Some(product_id) = req.product_id {
            item.product_id = product_id;
        }
        if let Some(quantity) = req.quantity {
            item.quantity = quantity;
        }
        if let Some(location) = req.warehouse_location {
            item.warehouse_location = location;
        }
        if let Some(min) = req.min_stock_level {
            item.min_stock_level = min;
        }
        item.last_updated = Utc::now();

        Ok(Some(item.clone()))
    }

    async fn count_low_stock(&self) -> StoreResult<i64> {
        let tables = self.tables();
        Ok(tables.inventory.iter().filter(|i| i.is_low_stock()).count() as i64)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let mut orders = self.tables().orders.clone();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn create_order(&self, req: CreateOrder) -> StoreResult<Order> {
        let mut tables = self.tables();
        let order = Order {
            id: next_id(&tables.orders),
            product_id: req.product_id,
            quantity: req.quantity,
            status: req.status,
            order_date: Utc::now(),
            delivery_date: req.delivery_date,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn count_orders_by_status(&self, status: OrderStatus) -> StoreResult<i64> {
        let tables = self.tables();
        Ok(tables.orders.iter().filter(|o| o.status == status).count() as i64)
    }
}

#[async_trait]
impl PipelineRepository for MemoryStore {
    async fn list_pipelines(&self) -> StoreResult<Vec<Pipeline>> {
        Ok(self.tables().pipelines.clone())
    }

    async fn find_pipeline(&self, id: i64) -> StoreResult<Option<Pipeline>> {
        Ok(self.tables().pipelines.iter().find(|p| p.id == id).cloned())
    }

    async fn create_pipeline(&self, req: CreatePipeline) -> StoreResult<Pipeline> {
        let mut tables = self.tables();
        let pipeline = Pipeline {
            id: next_id(&tables.pipelines),
            name: req.name,
            description: req.description,
            schedule: req.schedule,
            kind: req.kind,
            created_at: Utc::now(),
        };
        tables.pipelines.push(pipeline.clone());
        Ok(pipeline)
    }
}

#[async_trait]
impl RunRepository for MemoryStore {
    async fn create_run(&self, req: NewPipelineRun) -> StoreResult<PipelineRun> {
        let mut tables = self.tables();
        let run = PipelineRun {
            id: next_id(&tables.runs),
            pipeline_id: req.pipeline_id,
            start_time: req.start_time.unwrap_or_else(Utc::now),
            end_time: req.end_time,
            status: req.status,
            rows_processed: req.rows_processed,
            logs: req.logs,
        };
        tables.runs.push(run.clone());
        Ok(run)
    }

    async fn find_run(&self, id: i64) -> StoreResult<Option<PipelineRun>> {
        Ok(self.tables().runs.iter().find(|r| r.id == id).cloned())
    }

    async fn list_runs_for_pipeline(&self, pipeline_id: i64) -> StoreResult<Vec<PipelineRun>> {
        let mut runs: Vec<PipelineRun> = self
            .tables()
            .runs
            .iter()
            .filter(|r| r.pipeline_id == pipeline_id)
            .cloned()
            .collect();
        most_recent_first(&mut runs);
        Ok(runs)
    }

    async fn recent_runs(&self, limit: i64) -> StoreResult<Vec<PipelineRun>> {
        let mut runs = self.tables().runs.clone();
        most_recent_first(&mut runs);
        runs.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(runs)
    }

    async fn count_runs_by_status(&self, status: RunStatus) -> StoreResult<i64> {
        let tables = self.tables();
        Ok(tables.runs.iter().filter(|r| r.status == status).count() as i64)
    }

    async fn complete_run(
        &self,
        id: i64,
        completion: &RunCompletion,
    ) -> StoreResult<Option<PipelineRun>> {
        if self.take_injected_failure() {
            return Err(StoreError::Unavailable(
                "injected completion failure".to_string(),
            ));
        }

        let mut tables = self.tables();
        let Some(run) = tables.runs.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if run.apply(completion) {
            Ok(Some(run.clone()))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use depot_core::domain::pipeline::PipelineKind;

    fn run_started(pipeline_id: i64, minutes_ago: i64, status: RunStatus) -> NewPipelineRun {
        NewPipelineRun {
            pipeline_id,
            status,
            start_time: Some(Utc::now() - Duration::minutes(minutes_ago)),
            end_time: None,
            rows_processed: 0,
            logs: vec![],
        }
    }

    #[tokio::test]
    async fn test_runs_listed_most_recent_first() {
        let store = MemoryStore::new();
        store
            .create_run(run_started(1, 30, RunStatus::Failed))
            .await
            .unwrap();
        store
            .create_run(run_started(1, 10, RunStatus::Completed))
            .await
            .unwrap();
        store
            .create_run(run_started(2, 5, RunStatus::Completed))
            .await
            .unwrap();
        store
            .create_run(run_started(1, 20, RunStatus::Running))
            .await
            .unwrap();

        let runs = store.list_runs_for_pipeline(1).await.unwrap();
        let ids: Vec<i64> = runs.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);

        let recent = store.recent_runs(2).await.unwrap();
        let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_complete_run_applies_once() {
        let store = MemoryStore::new();
        let run = store
            .create_run(NewPipelineRun::running(1, vec!["[INFO] started".into()]))
            .await
            .unwrap();

        let first = store
            .complete_run(run.id, &RunCompletion::completed(12, vec![]))
            .await
            .unwrap();
        assert_eq!(first.map(|r| r.status), Some(RunStatus::Completed));

        let second = store
            .complete_run(run.id, &RunCompletion::failed(vec![]))
            .await
            .unwrap();
        assert!(second.is_none());

        let stored = store.find_run(run.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RunStatus::Completed);
        assert_eq!(stored.rows_processed, 12);
    }

    #[tokio::test]
    async fn test_complete_missing_run_is_not_applied() {
        let store = MemoryStore::new();
        let result = store
            .complete_run(99, &RunCompletion::failed(vec![]))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_injected_failures_are_consumed() {
        let store = MemoryStore::new();
        let run = store
            .create_run(NewPipelineRun::running(1, vec![]))
            .await
            .unwrap();
        store.fail_next_completions(1);

        let completion = RunCompletion::failed(vec![]);
        assert!(matches!(
            store.complete_run(run.id, &completion).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(
            store
                .complete_run(run.id, &completion)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_inventory_keeps_absent_fields() {
        let store = MemoryStore::new();
        let item = store
            .create_inventory_item(CreateInventoryItem {
                product_id: 1,
                quantity: 200,
                warehouse_location: "Zone B-05".to_string(),
                min_stock_level: 500,
            })
            .await
            .unwrap();

        let updated = store
            .update_inventory_item(
                item.id,
                UpdateInventoryItem {
                    quantity: Some(900),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 900);
        assert_eq!(updated.warehouse_location, "Zone B-05");
        assert_eq!(updated.min_stock_level, 500);
        assert!(updated.last_updated >= item.last_updated);

        assert!(
            store
                .update_inventory_item(42, UpdateInventoryItem::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_duplicate_sku_conflicts() {
        let store = MemoryStore::new();
        let req = CreateProduct {
            name: "Paracetamol 500mg".to_string(),
            sku: "MED-001".to_string(),
            category: "Pharmaceuticals".to_string(),
            unit_price: "0.05".to_string(),
            supplier_id: None,
        };

        store.create_product(req.clone()).await.unwrap();
        assert!(matches!(
            store.create_product(req).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_pipeline_ids_are_sequential() {
        let store = MemoryStore::new();
        for name in ["Daily Inventory Sync", "Supplier Order ETL"] {
            store
                .create_pipeline(CreatePipeline {
                    name: name.to_string(),
                    description: "desc".to_string(),
                    schedule: None,
                    kind: PipelineKind::Batch,
                })
                .await
                .unwrap();
        }

        let ids: Vec<i64> = store
            .list_pipelines()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(store.find_pipeline(3).await.unwrap().is_none());
    }
}
