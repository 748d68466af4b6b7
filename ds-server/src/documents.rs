//! Document, batch and query endpoints.

use crate::{ApiError, ApiResult, AppState, BatchResultDto, CommandDto, DocumentDto, QueryResultDto};

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{Method, Uri},
};
use log::info;

/// POST /bulk_docs - apply a JSON array of PUT/DELETE commands
pub async fn bulk_docs(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Vec<BatchResultDto>>> {
    let commands: Vec<CommandDto> = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid bulk_docs body: {e}")))?;

    let results = state.store.apply_batch(commands)?;
    info!("bulk_docs applied {} command(s)", results.len());
    Ok(Json(results))
}

/// GET /docs/{*key}
pub async fn get_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<DocumentDto>> {
    state
        .store
        .get(&key)
        .map(|doc| Json(doc.to_dto()))
        .ok_or_else(|| ApiError::not_found(format!("Document '{key}' does not exist")))
}

/// GET /indexes/dynamic/{collection}
pub async fn query_dynamic(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Json<QueryResultDto> {
    Json(state.store.query(&collection))
}

/// Fallback for unknown routes, so clients get a body explaining the 404.
pub async fn unknown_route(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {method} {uri}"))
}
