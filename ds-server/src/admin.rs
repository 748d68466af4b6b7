//! Administrative endpoints.

use crate::AppState;

use axum::{extract::State, http::StatusCode};
use log::info;

/// POST /admin/shutdown - stop accepting requests and exit cleanly.
pub async fn shutdown_handler(State(state): State<AppState>) -> StatusCode {
    info!("Graceful shutdown requested via HTTP");
    state.shutdown.shutdown();
    StatusCode::ACCEPTED
}
