//! Demo data
//!
//! Populates an empty store with a small supply chain so the dashboard has
//! something to show on first start.

use chrono::{Duration, Utc};
use depot_core::domain::order::OrderStatus;
use depot_core::domain::pipeline::PipelineKind;
use depot_core::domain::run::RunStatus;
use depot_core::dto::inventory::CreateInventoryItem;
use depot_core::dto::order::CreateOrder;
use depot_core::dto::pipeline::CreatePipeline;
use depot_core::dto::product::CreateProduct;
use depot_core::dto::run::NewPipelineRun;
use depot_core::dto::supplier::CreateSupplier;

use super::{Result, inventory_service};
use crate::repository::Store;

/// Inserts the demo data set unless suppliers already exist.
///
/// Returns whether anything was inserted.
pub async fn seed_if_empty(store: &dyn Store) -> Result<bool> {
    if store.count_suppliers().await? > 0 {
        tracing::debug!("Store already populated, skipping seed data");
        return Ok(false);
    }

    let medlife = store
        .create_supplier(supplier(
            "MedLife Pharmaceuticals",
            "New York, USA",
            "supply@medlife.com",
            "Manufacturer",
            "0.98",
        ))
        .await?;
    let ghe = store
        .create_supplier(supplier(
            "Global Health Equipment",
            "Berlin, Germany",
            "sales@ghe.de",
            "Distributor",
            "0.95",
        ))
        .await?;

    let paracetamol = store
        .create_product(product(
            "Paracetamol 500mg",
            "MED-001",
            "Pharmaceuticals",
            "0.05",
            medlife.id,
        ))
        .await?;
    let masks = store
        .create_product(product("Surgical Masks (N95)", "PPE-001", "PPE", "1.20", ghe.id))
        .await?;
    let ventilator = store
        .create_product(product(
            "Ventilator Type A",
            "EQP-900",
            "Equipment",
            "15000.00",
            ghe.id,
        ))
        .await?;

    for (product_id, quantity, location, min_stock_level) in [
        (paracetamol.id, 50_000, "Zone A-12", 10_000),
        (masks.id, 200, "Zone B-05", 500),
        (ventilator.id, 15, "Zone C-Secure", 5),
    ] {
        inventory_service::create_inventory_item(
            store,
            CreateInventoryItem {
                product_id,
                quantity,
                warehouse_location: location.to_string(),
                min_stock_level,
            },
        )
        .await?;
    }

    store
        .create_order(CreateOrder {
            product_id: masks.id,
            quantity: 1000,
            status: OrderStatus::Pending,
            delivery_date: None,
        })
        .await?;

    let inventory_sync = store
        .create_pipeline(CreatePipeline {
            name: "Daily Inventory Sync".to_string(),
            description: "Syncs inventory levels from warehouse ERP system".to_string(),
            schedule: Some("0 0 * * *".to_string()),
            kind: PipelineKind::Batch,
        })
        .await?;
    store
        .create_pipeline(CreatePipeline {
            name: "Supplier Order ETL".to_string(),
            description: "Extracts orders from supplier portals and loads to data warehouse"
                .to_string(),
            schedule: Some("0 */4 * * *".to_string()),
            kind: PipelineKind::Batch,
        })
        .await?;

    let started = Utc::now() - Duration::days(1);
    store
        .create_run(NewPipelineRun {
            pipeline_id: inventory_sync.id,
            status: RunStatus::Completed,
            start_time: Some(started),
            end_time: Some(started + Duration::minutes(5)),
            rows_processed: 15_420,
            logs: vec![
                "[INFO] Sync started".into(),
                "[INFO] Completed successfully".into(),
            ],
        })
        .await?;

    tracing::info!("Seeded store with demo supply chain data");

    Ok(true)
}

fn supplier(
    name: &str,
    location: &str,
    email: &str,
    supplier_type: &str,
    score: &str,
) -> CreateSupplier {
    CreateSupplier {
        name: name.to_string(),
        location: location.to_string(),
        contact_email: email.to_string(),
        supplier_type: supplier_type.to_string(),
        reliability_score: Some(score.to_string()),
    }
}

fn product(name: &str, sku: &str, category: &str, price: &str, supplier_id: i64) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        sku: sku.to_string(),
        category: category.to_string(),
        unit_price: price.to_string(),
        supplier_id: Some(supplier_id),
    }
}
