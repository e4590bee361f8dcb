use std::sync::Arc;
use storage::InMemoryStore;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<InMemoryStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: Arc::new(InMemoryStore::new()),
        }
    }
}
