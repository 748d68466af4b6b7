//! Background task keeping the dynamic index in step with writes.

use crate::{MemoryStore, ShutdownGuard};

use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;

/// Catch the index up `delay` after each burst of writes until shutdown.
pub fn spawn(store: MemoryStore, delay: Duration, mut shutdown: ShutdownGuard) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Indexer started (delay {}ms)", delay.as_millis());
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = store.changed() => {}
            }

            tokio::select! {
                _ = shutdown.wait() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            store.catch_up_index();
        }
        info!("Indexer stopped");
    })
}
