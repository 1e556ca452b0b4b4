//! HTTP API tests
//!
//! Drive the router in-process against the in-memory store.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use depot_server::api::create_router;
use depot_server::engine::{EngineSettings, RandomOutcome, RetryPolicy, RunEngine};
use depot_server::repository::{MemoryStore, Store};
use depot_server::service::seed;
use depot_server::state::AppState;

fn engine_settings() -> EngineSettings {
    EngineSettings {
        run_duration: Duration::from_millis(100),
        max_concurrent_runs: 4,
        write_retry: RetryPolicy {
            max_attempts: 2,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(2),
        },
    }
}

fn app_with(store: Arc<dyn Store>, success_rate: f64) -> Router {
    let engine = Arc::new(RunEngine::new(
        Arc::clone(&store),
        Arc::new(RandomOutcome::new(success_rate)),
        engine_settings(),
    ));
    create_router(AppState::new(store, engine))
}

async fn seeded_app() -> Router {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed::seed_if_empty(store.as_ref()).await.unwrap();
    app_with(store, 1.0)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_health_check() {
    let app = seeded_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_seeded_dashboard_stats() {
    let app = seeded_app().await;

    let (status, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalSuppliers"], 2);
    assert_eq!(stats["totalProducts"], 3);
    assert_eq!(stats["lowStockItems"], 1);
    assert_eq!(stats["pendingOrders"], 1);
    assert_eq!(stats["activePipelines"], 0);
    assert_eq!(stats["pipelineHealth"], 100);
}

#[tokio::test]
async fn test_empty_store_reports_full_health() {
    let app = app_with(Arc::new(MemoryStore::new()), 1.0);

    let (status, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalSuppliers"], 0);
    assert_eq!(stats["pipelineHealth"], 100);
}

#[tokio::test]
async fn test_create_pipeline_and_trigger_run() {
    let app = app_with(Arc::new(MemoryStore::new()), 1.0);

    let (status, pipeline) = send(
        &app,
        "POST",
        "/api/pipelines",
        Some(json!({
            "name": "Warehouse Snapshot",
            "description": "Copies stock levels nightly",
            "type": "Batch"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pipeline["type"], "Batch");
    let id = pipeline["id"].as_i64().unwrap();

    let (status, run) = send(&app, "POST", &format!("/api/pipelines/{id}/trigger"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(run["pipelineId"], id);
    assert_eq!(run["status"], "Running");
    assert_eq!(run["rowsProcessed"], 0);
    assert!(run["endTime"].is_null());
    assert_eq!(run["logs"], json!(["[INFO] Pipeline execution started"]));

    let (_, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(stats["activePipelines"], 1);
    assert_eq!(stats["pipelineHealth"], 0);

    // Poll until the run reaches its terminal state
    let runs_uri = format!("/api/pipelines/{id}/runs");
    let mut finished = Value::Null;
    for _ in 0..200 {
        let (status, runs) = send(&app, "GET", &runs_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(runs.as_array().unwrap().len(), 1);
        if runs[0]["status"] != "Running" {
            finished = runs[0].clone();
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(finished["status"], "Completed");
    assert!(!finished["endTime"].is_null());
    assert_eq!(finished["logs"].as_array().unwrap().len(), 3);

    let (_, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(stats["activePipelines"], 0);
    assert_eq!(stats["pipelineHealth"], 100);
}

#[tokio::test]
async fn test_trigger_unknown_pipeline_is_not_found() {
    let app = seeded_app().await;

    let (status, body) = send(&app, "POST", "/api/pipelines/999/trigger", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());

    let (status, _) = send(&app, "GET", "/api/pipelines/999/runs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_runs_listed_most_recent_first() {
    let app = seeded_app().await;

    let (status, run) = send(&app, "POST", "/api/pipelines/1/trigger", None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, runs) = send(&app, "GET", "/api/pipelines/1/runs", None).await;
    assert_eq!(status, StatusCode::OK);
    let runs = runs.as_array().unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0]["id"], run["id"]);
    assert_eq!(runs[1]["status"], "Completed");
}

#[tokio::test]
async fn test_product_validation_and_lookup() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "",
            "sku": "MED-002",
            "category": "Medicine",
            "unitPrice": "1.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Gloves",
            "sku": "PPE-777",
            "category": "PPE",
            "unitPrice": "abc"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "name": "Gloves",
            "sku": "PPE-777",
            "category": "PPE",
            "unitPrice": "0.25",
            "supplierId": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = product["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["sku"], "PPE-777");

    let (status, body) = send(&app, "GET", "/api/products/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_inventory_update_clears_low_stock() {
    let app = seeded_app().await;

    let (status, items) = send(&app, "GET", "/api/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    let low = items
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["quantity"].as_i64() < item["minStockLevel"].as_i64())
        .cloned()
        .unwrap();
    assert!(low["product"]["name"].is_string());
    let id = low["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/inventory/{id}"),
        Some(json!({ "quantity": 900 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 900);
    assert_eq!(updated["warehouseLocation"], low["warehouseLocation"]);

    let (_, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(stats["lowStockItems"], 0);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/inventory/999",
        Some(json!({ "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/inventory/{id}"),
        Some(json!({ "quantity": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suppliers_and_orders() {
    let app = seeded_app().await;

    let (status, supplier) = send(
        &app,
        "POST",
        "/api/suppliers",
        Some(json!({
            "name": "Nordic Medical",
            "location": "Oslo, Norway",
            "contactEmail": "sales@nordicmed.example",
            "type": "Distributor"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(supplier["type"], "Distributor");

    let (_, suppliers) = send(&app, "GET", "/api/suppliers", None).await;
    assert_eq!(suppliers.as_array().unwrap().len(), 3);

    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "productId": 1, "quantity": 25, "status": "Pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "Pending");

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "productId": 1, "quantity": 0, "status": "Pending" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = send(&app, "GET", "/api/orders", None).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], order["id"]);

    let (_, stats) = send(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(stats["pendingOrders"], 2);
}
