//! Repository Module
//!
//! Data access layer for the server.
//! Each trait covers the records of one entity; [`Store`] is the full record
//! store handed to services, the run engine and the dashboard aggregator.
//!
//! Two implementations exist: [`PgStore`] over a Postgres pool and
//! [`MemoryStore`] for tests and database-less runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
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
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to encode column: {0}")]
    Encoding(#[from] serde_json::Error),

    /// A unique constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    /// A stored row could not be mapped back to a domain type
    #[error("invalid row: {0}")]
    InvalidRow(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>>;
    async fn create_supplier(&self, req: CreateSupplier) -> StoreResult<Supplier>;
    async fn count_suppliers(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn find_product(&self, id: i64) -> StoreResult<Option<Product>>;
    async fn find_product_by_sku(&self, sku: &str) -> StoreResult<Option<Product>>;
    async fn create_product(&self, req: CreateProduct) -> StoreResult<Product>;
    async fn count_products(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Every inventory row joined with its product
    async fn list_inventory(&self) -> StoreResult<Vec<InventoryWithProduct>>;
    async fn find_inventory_item(&self, id: i64) -> StoreResult<Option<InventoryItem>>;
    async fn create_inventory_item(&self, req: CreateInventoryItem) -> StoreResult<InventoryItem>;

    /// Applies the present fields and refreshes `last_updated`.
    /// Returns `None` if the row does not exist.
    async fn update_inventory_item(
        &self,
        id: i64,
        req: UpdateInventoryItem,
    ) -> StoreResult<Option<InventoryItem>>;

    /// Rows whose quantity is strictly below their minimum stock level
    async fn count_low_stock(&self) -> StoreResult<i64>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All orders, most recent order date first
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn create_order(&self, req: CreateOrder) -> StoreResult<Order>;
    async fn count_orders_by_status(&self, status: OrderStatus) -> StoreResult<i64>;
}

#[async_trait]
pub trait PipelineRepository: Send + Sync {
    async fn list_pipelines(&self) -> StoreResult<Vec<Pipeline>>;
    async fn find_pipeline(&self, id: i64) -> StoreResult<Option<Pipeline>>;
    async fn create_pipeline(&self, req: CreatePipeline) -> StoreResult<Pipeline>;
}

#[async_trait]
pub trait RunRepository: Send + Sync {
    async fn create_run(&self, req: NewPipelineRun) -> StoreResult<PipelineRun>;
    async fn find_run(&self, id: i64) -> StoreResult<Option<PipelineRun>>;

    /// Runs of one pipeline, most recently started first
    async fn list_runs_for_pipeline(&self, pipeline_id: i64) -> StoreResult<Vec<PipelineRun>>;

    /// The `limit` most recently started runs across all pipelines
    async fn recent_runs(&self, limit: i64) -> StoreResult<Vec<PipelineRun>>;

    async fn count_runs_by_status(&self, status: RunStatus) -> StoreResult<i64>;

    /// Writes the terminal transition of a run.
    ///
    /// The write only applies while the run is still `Running`; `Ok(None)`
    /// means the run is missing or already terminal and nothing changed.
    async fn complete_run(
        &self,
        id: i64,
        completion: &RunCompletion,
    ) -> StoreResult<Option<PipelineRun>>;
}

/// The complete record store
pub trait Store:
    SupplierRepository
    + ProductRepository
    + InventoryRepository
    + OrderRepository
    + PipelineRepository
    + RunRepository
{
}

impl<T> Store for T where
    T: SupplierRepository
        + ProductRepository
        + InventoryRepository
        + OrderRepository
        + PipelineRepository
        + RunRepository
{
}
