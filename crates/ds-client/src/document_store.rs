use crate::http::HttpClient;
use crate::{ClientResult, Conventions, DatabaseCommands, Session};

use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Entry point of the client: one server URL plus the conventions every
/// session uses.
pub struct DocumentStore {
    http: HttpClient,
    conventions: Conventions,
}

impl DocumentStore {
    /// Create a store for the server at `url` (e.g. a driver's `url()`).
    pub fn new(url: &str, conventions: Conventions) -> ClientResult<Self> {
        Self::with_timeout(url, conventions, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        url: &str,
        conventions: Conventions,
        request_timeout: Duration,
    ) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(url, request_timeout)?,
            conventions,
        })
    }

    /// Base URL, always with a trailing slash.
    pub fn url(&self) -> &str {
        self.http.base_url()
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn open_session(&self) -> Session<'_> {
        Session::new(self)
    }

    pub fn database_commands(&self) -> DatabaseCommands<'_> {
        DatabaseCommands::new(&self.http)
    }
}
