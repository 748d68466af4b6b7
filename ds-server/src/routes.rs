use crate::{AppState, admin, documents, health};

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Documents
        .route("/bulk_docs", post(documents::bulk_docs))
        .route("/docs/{*key}", get(documents::get_document))
        .route(
            "/indexes/dynamic/{collection}",
            get(documents::query_dynamic),
        )
        // Admin endpoints
        .route("/admin/shutdown", post(admin::shutdown_handler))
        .fallback(documents::unknown_route)
        .with_state(state)
}
