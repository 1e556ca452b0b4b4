use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot_server::config::{Config, StoreBackend};
use depot_server::engine::{RandomOutcome, RunEngine};
use depot_server::repository::{MemoryStore, PgStore, Store};
use depot_server::service::seed;
use depot_server::state::AppState;
use depot_server::shutdown::shutdown_signal;
use depot_server::{api, db};

/// Upper bound on waiting for in-flight runs after the listener stops
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "depot_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Depot Server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: store={:?}, run_duration={:?}, max_concurrent_runs={}",
        config.store, config.run_duration, config.max_concurrent_runs
    );

    let store = open_store(&config).await?;

    if config.seed {
        let seeded = seed::seed_if_empty(store.as_ref())
            .await
            .context("Failed to seed demo data")?;
        if seeded {
            info!("Demo data inserted");
        }
    }

    let outcomes = Arc::new(RandomOutcome::new(config.run_success_rate));
    let engine = Arc::new(RunEngine::new(
        Arc::clone(&store),
        outcomes,
        config.engine_settings(),
    ));

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(store, Arc::clone(&engine)));

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let executor = engine.executor();
    let pending = executor.in_flight();
    if !pending.is_empty() {
        info!("Waiting for {} in-flight run(s) to finish", pending.len());
    }
    if !executor.wait_idle(DRAIN_TIMEOUT).await {
        warn!(
            "Shutting down with runs still in flight: {:?}",
            executor.in_flight()
        );
    }

    let dead = executor.dead_letters();
    if !dead.is_empty() {
        warn!("{} run(s) could not record their terminal state", dead.len());
        for letter in &dead {
            warn!(
                "  - run {} (pipeline {}): intended {}, {}",
                letter.run_id, letter.pipeline_id, letter.intended_status, letter.last_error
            );
        }
    }

    info!("Depot Server stopped");
    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    match config.store {
        StoreBackend::Postgres => {
            info!("Connecting to database...");

            let pool = db::create_pool(&config.database_url, config.db_max_connections)
                .await
                .context("Failed to create database pool")?;

            info!("Database connection pool created");

            db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store, data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
