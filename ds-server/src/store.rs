//! In-memory documents plus a dynamic index that lags behind writes.
//!
//! Every write bumps a store-wide etag. The index records the etag it last
//! caught up to; a query is stale while that etag is behind the store's.

use crate::{ApiError, ApiResult, BatchResultDto, CommandDto, DocumentDto, QueryResultDto};

use ds_config::ENTITY_NAME_KEY;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use serde_json::{Map, Value};
use tokio::sync::Notify;

const DEFAULT_COLLECTION: &str = "Documents";

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: String,
    pub document: Value,
    pub metadata: Map<String, Value>,
    pub etag: u64,
}

impl StoredDocument {
    pub fn collection(&self) -> Option<&str> {
        self.metadata.get(ENTITY_NAME_KEY).and_then(Value::as_str)
    }

    pub fn to_dto(&self) -> DocumentDto {
        DocumentDto {
            key: self.key.clone(),
            document: self.document.clone(),
            metadata: self.metadata.clone(),
            etag: self.etag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Default)]
struct StoreInner {
    documents: BTreeMap<String, StoredDocument>,
    last_etag: u64,
    next_ids: HashMap<String, u64>,
    index_etag: u64,
    indexed: BTreeMap<String, StoredDocument>,
}

impl StoreInner {
    fn generate_key(&mut self, metadata: &Map<String, Value>) -> String {
        let collection = metadata
            .get(ENTITY_NAME_KEY)
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLLECTION)
            .to_string();

        loop {
            let next = self.next_ids.entry(collection.clone()).or_insert(0);
            *next += 1;
            let key = format!("{collection}/{next}");
            if !self.documents.contains_key(&key) {
                return key;
            }
        }
    }
}

/// Shared handle to the store; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
    changed: Arc<Notify>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a `bulk_docs` batch.
    ///
    /// Commands are validated up front; an invalid command rejects the whole
    /// batch and nothing is written.
    pub fn apply_batch(&self, commands: Vec<CommandDto>) -> ApiResult<Vec<BatchResultDto>> {
        let validated = commands
            .into_iter()
            .enumerate()
            .map(|(i, command)| validate(i, command))
            .collect::<ApiResult<Vec<_>>>()?;

        let results = {
            let mut inner = self.lock();
            let mut results = Vec::with_capacity(validated.len());

            for (method, command) in validated {
                inner.last_etag += 1;
                let etag = inner.last_etag;

                let key = match method {
                    Method::Put => {
                        let key = match command.key {
                            Some(key) => key,
                            None => inner.generate_key(&command.metadata),
                        };
                        let document = StoredDocument {
                            key: key.clone(),
                            document: command.document.unwrap_or(Value::Null),
                            metadata: command.metadata,
                            etag,
                        };
                        inner.documents.insert(key.clone(), document);
                        key
                    }
                    Method::Delete => {
                        let key = command.key.unwrap_or_default();
                        inner.documents.remove(&key);
                        key
                    }
                };

                debug!("{} {key} (etag {etag})", method.as_str());
                results.push(BatchResultDto {
                    method: method.as_str().to_string(),
                    key,
                    etag,
                });
            }
            results
        };

        if !results.is_empty() {
            self.changed.notify_one();
        }
        Ok(results)
    }

    pub fn get(&self, key: &str) -> Option<StoredDocument> {
        self.lock().documents.get(key).cloned()
    }

    /// Query the dynamic index of `collection` (case-insensitive).
    pub fn query(&self, collection: &str) -> QueryResultDto {
        let inner = self.lock();
        let results: Vec<Value> = inner
            .indexed
            .values()
            .filter(|doc| {
                doc.collection()
                    .is_some_and(|c| c.eq_ignore_ascii_case(collection))
            })
            .map(|doc| doc.document.clone())
            .collect();

        QueryResultDto {
            total_results: results.len(),
            results,
            is_stale: inner.index_etag < inner.last_etag,
            index_etag: inner.index_etag,
        }
    }

    /// Bring the index up to date with every write so far.
    /// Returns the etag the index now reflects.
    pub fn catch_up_index(&self) -> u64 {
        let mut inner = self.lock();
        let last_etag = inner.last_etag;
        if inner.index_etag < last_etag {
            let snapshot = inner.documents.clone();
            inner.indexed = snapshot;
            inner.index_etag = last_etag;
            debug!("Index caught up to etag {}", inner.index_etag);
        }
        inner.index_etag
    }

    /// Wait until a write happens after the last call returned.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    pub fn last_etag(&self) -> u64 {
        self.lock().last_etag
    }

    pub fn index_etag(&self) -> u64 {
        self.lock().index_etag
    }

    pub fn document_count(&self) -> usize {
        self.lock().documents.len()
    }
}

fn validate(position: usize, command: CommandDto) -> ApiResult<(Method, CommandDto)> {
    let method = match command.method.to_ascii_uppercase().as_str() {
        "PUT" => Method::Put,
        "DELETE" => Method::Delete,
        other => {
            return Err(ApiError::bad_request(format!(
                "Command {position}: unsupported method '{other}'"
            )));
        }
    };

    if command.key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        return Err(ApiError::bad_request(format!(
            "Command {position}: Key must not be empty"
        )));
    }

    match method {
        Method::Put if !command.document.as_ref().is_some_and(Value::is_object) => {
            Err(ApiError::bad_request(format!(
                "Command {position}: PUT requires a JSON object Document"
            )))
        }
        Method::Delete if command.key.is_none() => Err(ApiError::bad_request(format!(
            "Command {position}: DELETE requires a Key"
        ))),
        _ => Ok((method, command)),
    }
}
