//! Server startup, port discovery and graceful shutdown.

use crate::{
    AppState, Cli, MemoryStore, ServerError, ServerErrorResult, ShutdownCoordinator, build_router,
    indexer,
};

use ds_config::PortFileInfo;

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{error, info, warn};
use tokio::net::TcpListener;

/// Run the server until shutdown is requested.
///
/// Once the listener is bound the port discovery file is written into the
/// data directory; it is removed again after a graceful shutdown.
pub async fn run(cli: Cli) -> ServerErrorResult<()> {
    info!(
        "Starting ds-server v{} for shard {}",
        env!("CARGO_PKG_VERSION"),
        cli.shard
    );

    if cli.startup_delay_ms > 0 {
        info!("Delaying startup by {}ms", cli.startup_delay_ms);
        tokio::time::sleep(Duration::from_millis(cli.startup_delay_ms)).await;
    }

    std::fs::create_dir_all(&cli.data_dir)?;

    let store = MemoryStore::new();
    let shutdown = ShutdownCoordinator::new();
    let indexer = indexer::spawn(
        store.clone(),
        Duration::from_millis(cli.index_delay_ms),
        shutdown.subscribe_guard(),
    );

    let app = build_router(AppState::new(&cli.shard, store, shutdown.clone()));

    let listener = TcpListener::bind((cli.host.as_str(), cli.port))
        .await
        .map_err(|e| ServerError::Bind {
            address: format!("{}:{}", cli.host, cli.port),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

    // Port 0 binds an OS-assigned port
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {actual_addr}");

    let port_file =
        PortFileInfo::for_current_process(actual_addr.port(), cli.advertised_host(), &cli.shard);
    let path = port_file.write_in(&cli.data_dir)?;
    info!("Port file written: {}", path.display());

    spawn_signal_handler(shutdown.clone());

    info!("Server ready to accept connections");
    let mut guard = shutdown.subscribe_guard();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            guard.wait().await;
        })
        .await;

    shutdown.shutdown();
    if let Err(e) = indexer.await {
        warn!("Indexer task ended abnormally: {e}");
    }

    if let Err(e) = PortFileInfo::remove_in(&cli.data_dir) {
        warn!("Failed to remove port file: {e}");
    }

    served?;
    info!("Graceful shutdown complete");
    Ok(())
}

fn spawn_signal_handler(shutdown: ShutdownCoordinator) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for SIGINT: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{SignalKind, signal};

            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    error!("Failed to listen for SIGTERM: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
            _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
        }
        shutdown.shutdown();
    });
}
