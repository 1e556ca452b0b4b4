//! Shared application state handed to every handler

use std::sync::Arc;

use crate::engine::RunEngine;
use crate::repository::Store;
use crate::service::DashboardAggregator;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub engine: Arc<RunEngine>,
    pub aggregator: Arc<DashboardAggregator>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, engine: Arc<RunEngine>) -> Self {
        let aggregator = Arc::new(DashboardAggregator::new(Arc::clone(&store)));
        Self {
            store,
            engine,
            aggregator,
        }
    }
}
