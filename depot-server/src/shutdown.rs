//! Graceful shutdown trigger

use std::future::Future;
use std::io;
use tracing::{info, warn};

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    wait_for(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires; never resolves if listening fails
async fn wait_for<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
