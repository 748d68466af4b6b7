//! Direct document and index operations, bypassing session tracking.

use crate::http::HttpClient;
use crate::{BatchResult, ClientResult, Command, JsonDocument, QueryResult};

use tracing::info;

const BULK_DOCS_SEGMENT: &str = "bulk_docs";
const DOCS_SEGMENT: &str = "docs";
const INDEXES_SEGMENT: &str = "indexes";
const DYNAMIC_SEGMENT: &str = "dynamic";

#[derive(Clone, Copy)]
pub struct DatabaseCommands<'a> {
    http: &'a HttpClient,
}

impl<'a> DatabaseCommands<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Send `commands` as one `bulk_docs` request. The server applies them
    /// in order and answers with one result per command.
    pub fn batch(&self, commands: &[Command]) -> ClientResult<Vec<BatchResult>> {
        if commands.is_empty() {
            return Ok(Vec::new());
        }

        let results: Vec<BatchResult> = self.http.post_json(&[BULK_DOCS_SEGMENT], commands)?;
        info!("Batch of {} command(s) applied", results.len());
        Ok(results)
    }

    /// Load one document. `/` in the key separates path segments; every
    /// other reserved character is percent-encoded.
    pub fn get(&self, key: &str) -> ClientResult<Option<JsonDocument>> {
        let segments: Vec<&str> = std::iter::once(DOCS_SEGMENT)
            .chain(key.split('/'))
            .collect();
        self.http.get_optional_json(&segments)
    }

    /// One query against the collection's dynamic index, stale or not.
    pub fn query(&self, collection: &str) -> ClientResult<QueryResult> {
        self.http.get_json(&[INDEXES_SEGMENT, DYNAMIC_SEGMENT, collection])
    }
}
