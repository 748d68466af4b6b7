use crate::{DriverState, ProcessOutput};

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Failed to launch {}: {message} {location}{output}", .binary.display())]
    Launch {
        binary: PathBuf,
        message: String,
        output: ProcessOutput,
        location: ErrorLocation,
    },

    #[error("Server not ready within {timeout_ms}ms (last probe error: {last_error}) {location}{output}")]
    Timeout {
        timeout_ms: u64,
        last_error: String,
        output: ProcessOutput,
        location: ErrorLocation,
    },

    #[error("Server process exited before becoming ready (exit code {code:?}) {location}{output}")]
    ProcessExited {
        code: Option<i32>,
        output: ProcessOutput,
        location: ErrorLocation,
    },

    #[error("Cannot {operation} while driver is {state} {location}")]
    InvalidState {
        operation: &'static str,
        state: DriverState,
        location: ErrorLocation,
    },

    #[error("{method} {url} failed with HTTP {status}: {body} {location}")]
    RemoteRequest {
        method: String,
        url: String,
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("Failed to terminate server process {pid}: {message} {location}")]
    Teardown {
        pid: u32,
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration invalid: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("JSON error: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("HTTP error: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl DriverError {
    #[track_caller]
    pub fn launch<S: Into<String>>(binary: impl Into<PathBuf>, message: S) -> Self {
        Self::Launch {
            binary: binary.into(),
            message: message.into(),
            output: ProcessOutput::default(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_state(operation: &'static str, state: DriverState) -> Self {
        Self::InvalidState {
            operation,
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn teardown<S: Into<String>>(pid: u32, message: S) -> Self {
        Self::Teardown {
            pid,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether retrying the same operation could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Http { .. })
    }

    /// Captured server output attached to this error, if any.
    pub fn output(&self) -> Option<&ProcessOutput> {
        match self {
            Self::Launch { output, .. }
            | Self::Timeout { output, .. }
            | Self::ProcessExited { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DriverError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for DriverError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for DriverError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DriverError>;
