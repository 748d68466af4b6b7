use crate::documents::{bulk_docs, get_document, query_dynamic, unknown_route};
use crate::{ApiError, AppState, MemoryStore, ShutdownCoordinator};

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use googletest::prelude::*;

fn state() -> AppState {
    AppState::new("Docs-1-0", MemoryStore::new(), ShutdownCoordinator::new())
}

const PUT_GREETING: &str = r#"[{"Method":"PUT","Key":null,
    "Document":{"item1":"hello","item2":"world"},
    "Metadata":{"Ds-Entity-Name":"Greetings","Ds-Rust-Type":"e2e::Greeting"}}]"#;

#[tokio::test]
async fn given_valid_body_when_bulk_docs_then_results_returned_and_document_stored() {
    let state = state();

    let results = bulk_docs(
        State(state.clone()),
        Bytes::from_static(PUT_GREETING.as_bytes()),
    )
    .await
    .unwrap();

    assert_that!(results.0.len(), eq(1));
    let key = results.0[0].key.clone();
    let doc = get_document(State(state), Path(key)).await.unwrap();
    assert_that!(doc.0.document["item2"], eq(&serde_json::json!("world")));
}

#[tokio::test]
async fn given_malformed_body_when_bulk_docs_then_bad_request() {
    let result = bulk_docs(State(state()), Bytes::from_static(b"{not json")).await;

    match result {
        Err(e) => assert_that!(e.status(), eq(StatusCode::BAD_REQUEST)),
        Ok(_) => panic!("expected bad request"),
    }
}

#[tokio::test]
async fn given_missing_key_when_get_document_then_not_found() {
    let result = get_document(State(state()), Path("Greetings/404".to_string())).await;

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[tokio::test]
async fn given_write_before_index_when_query_dynamic_then_reported_stale() {
    let state = state();
    bulk_docs(
        State(state.clone()),
        Bytes::from_static(PUT_GREETING.as_bytes()),
    )
    .await
    .unwrap();

    let result = query_dynamic(State(state), Path("Greetings".to_string())).await;

    assert!(result.0.is_stale);
}

#[tokio::test]
async fn given_unknown_route_when_requested_then_not_found_names_route() {
    let error = unknown_route(Method::POST, Uri::from_static("/no_such_endpoint")).await;

    match error {
        ApiError::NotFound { message, .. } => {
            assert_that!(message, contains_substring("/no_such_endpoint"));
        }
        other => panic!("expected not found, got {other:?}"),
    }
}
