//! Wire types exchanged with the server.

use crate::{ClientError, ClientResult, Conventions};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommandMethod {
    Put,
    Delete,
}

/// One entry of a `bulk_docs` batch.
///
/// A `PUT` without a key lets the server assign one from the document's
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Command {
    pub method: CommandMethod,
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Command {
    pub fn put(key: Option<String>, document: Value, metadata: Map<String, Value>) -> Self {
        Self {
            method: CommandMethod::Put,
            key,
            document: Some(document),
            metadata,
        }
    }

    /// `PUT` for an entity, with metadata taken from `conventions`.
    ///
    /// The entity must serialize to a JSON object.
    pub fn put_entity<T: Serialize>(
        key: Option<String>,
        entity: &T,
        conventions: &Conventions,
    ) -> ClientResult<Self> {
        let document = serde_json::to_value(entity)?;
        if !document.is_object() {
            return Err(ClientError::invalid_document(format!(
                "{} must serialize to a JSON object",
                conventions.rust_type_name::<T>()
            )));
        }
        Ok(Self::put(key, document, conventions.metadata_for::<T>()))
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            method: CommandMethod::Delete,
            key: Some(key.into()),
            document: None,
            metadata: Map::new(),
        }
    }
}

/// Outcome of one command in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchResult {
    pub method: CommandMethod,
    pub key: String,
    pub etag: u64,
}

/// A stored document as returned by `GET /docs/{key}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JsonDocument {
    pub key: String,
    pub document: Value,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub etag: u64,
}

/// Response of a dynamic index query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResult {
    pub results: Vec<Value>,
    pub is_stale: bool,
    pub index_etag: u64,
    pub total_results: usize,
}
