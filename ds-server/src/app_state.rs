use crate::{MemoryStore, ShutdownCoordinator};

use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub shard: Arc<str>,
    pub store: MemoryStore,
    pub shutdown: ShutdownCoordinator,
}

impl AppState {
    pub fn new(shard: &str, store: MemoryStore, shutdown: ShutdownCoordinator) -> Self {
        Self {
            shard: Arc::from(shard),
            store,
            shutdown,
        }
    }
}
