use crate::{ClientError, ClientResult};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Blocking JSON transport bound to one server base URL.
pub(crate) struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalized)
            .map_err(|e| ClientError::invalid_url(base_url, e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::invalid_url(base_url, "not a base URL"));
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded on its own.
    fn url(&self, segments: &[&str]) -> ClientResult<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::invalid_url(self.base_url.as_str(), "not a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.url(segments)?;
        let body = self.execute(Method::GET, &url, self.client.get(&url))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like [`HttpClient::get_json`], with 404 mapped to `None`.
    pub(crate) fn get_optional_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> ClientResult<Option<T>> {
        match self.get_json(segments) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND.as_u16()) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn post_json<B, T>(&self, segments: &[&str], body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        let request = self.client.post(&url).json(body);
        let text = self.execute(Method::POST, &url, request)?;
        Ok(serde_json::from_str(&text)?)
    }

    #[track_caller]
    fn execute(&self, method: Method, url: &str, request: RequestBuilder) -> ClientResult<String> {
        debug!("{method} {url}");
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            if status != StatusCode::NOT_FOUND {
                error!("{method} {url} returned {status}: {body}");
            }
            return Err(ClientError::Api {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(body)
    }
}
