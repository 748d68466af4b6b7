//! Raw HTTP exchanges with a running server, bypassing any client library.

use crate::{DriverError, DriverResult, ServerAddress};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, error};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Blocking HTTP helper bound to a server's base address.
///
/// Non-2xx responses become [`DriverError::RemoteRequest`] with the response
/// body attached; the body is also logged before the error is returned.
pub struct RawHttp {
    client: Client,
    base: ServerAddress,
}

impl RawHttp {
    pub fn new(base: ServerAddress, request_timeout: Duration) -> DriverResult<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &ServerAddress {
        &self.base
    }

    /// GET `path`, returning the response body.
    pub fn get(&self, path: &str) -> DriverResult<String> {
        let url = self.base.join(path);
        self.execute(Method::GET, &url, self.client.get(&url))
    }

    /// POST a pre-serialized JSON body, returning the response body.
    pub fn post_raw_json(&self, path: &str, body: String) -> DriverResult<String> {
        let url = self.base.join(path);
        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.execute(Method::POST, &url, request)
    }

    /// POST `body` serialized as JSON, returning the parsed response.
    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> DriverResult<serde_json::Value> {
        let text = self.post_raw_json(path, serde_json::to_string(body)?)?;

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn execute(&self, method: Method, url: &str, request: RequestBuilder) -> DriverResult<String> {
        debug!("{method} {url}");
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            error!("{method} {url} returned {status}: {body}");
            return Err(DriverError::RemoteRequest {
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
