use crate::{ClientError, ClientResult, DatabaseCommands, QueryResult};

use std::marker::PhantomData;
use std::panic::Location;
use std::thread;
use std::time::{Duration, Instant};

use error_location::ErrorLocation;
use serde::de::DeserializeOwned;
use tracing::debug;

const DEFAULT_STALE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Query against a collection's dynamic index.
///
/// Without [`Query::wait_for_non_stale_results`] the first answer is used
/// even if the index has not caught up with recent writes.
pub struct Query<'a, T> {
    commands: DatabaseCommands<'a>,
    collection: String,
    wait_timeout: Option<Duration>,
    poll_interval: Duration,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Query<'a, T> {
    pub(crate) fn new(commands: DatabaseCommands<'a>, collection: String) -> Self {
        Self {
            commands,
            collection,
            wait_timeout: None,
            poll_interval: DEFAULT_STALE_POLL_INTERVAL,
            _marker: PhantomData,
        }
    }

    /// Query a collection other than the one `T` maps to.
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Re-issue the query until the index reports it is up to date with
    /// every write made before the query, failing with
    /// [`ClientError::StaleIndex`] after `timeout`.
    pub fn wait_for_non_stale_results(mut self, timeout: Duration) -> Self {
        self.wait_timeout = Some(timeout);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn to_list(self) -> ClientResult<Vec<T>> {
        let result = self.fetch()?;
        result
            .results
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(ClientError::from))
            .collect()
    }

    /// The only result. Zero or several results are an error.
    pub fn single(self) -> ClientResult<T> {
        let collection = self.collection.clone();
        let mut results = self.to_list()?;
        let count = results.len();

        match (results.pop(), count) {
            (Some(only), 1) => Ok(only),
            _ => Err(ClientError::NotSingle {
                collection,
                count,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    fn fetch(&self) -> ClientResult<QueryResult> {
        let start = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let result = self.commands.query(&self.collection)?;

            let Some(timeout) = self.wait_timeout else {
                return Ok(result);
            };
            if !result.is_stale {
                debug!(
                    "Query on '{}' non-stale after {attempts} attempt(s)",
                    self.collection
                );
                return Ok(result);
            }
            if start.elapsed() >= timeout {
                return Err(ClientError::StaleIndex {
                    collection: self.collection.clone(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            let remaining = timeout.saturating_sub(start.elapsed());
            thread::sleep(self.poll_interval.min(remaining));
        }
    }
}
