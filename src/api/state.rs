use std::sync::Arc;

use crate::database_ops::games::GameStore;
use crate::ingest::CatalogSource;

/// Shared per-server state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GameStore>,
    pub source: Arc<dyn CatalogSource>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, source: Arc<dyn CatalogSource>) -> Self {
        Self { store, source }
    }
}
