//! JSON bodies of the document endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a `POST /bulk_docs` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandDto {
    pub method: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub document: Option<Value>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchResultDto {
    pub method: String,
    pub key: String,
    pub etag: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentDto {
    pub key: String,
    pub document: Value,
    pub metadata: Map<String, Value>,
    pub etag: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResultDto {
    pub results: Vec<Value>,
    pub is_stale: bool,
    pub index_etag: u64,
    pub total_results: usize,
}
