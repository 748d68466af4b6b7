use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Failures reading or writing a shard's port discovery file.
#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Port file I/O failed at {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Malformed port file {path}: {source} {location}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Server already running on port {port} (PID {pid}) in {data_dir} {location}")]
    AlreadyRunning {
        pid: u32,
        port: u16,
        data_dir: PathBuf,
        location: ErrorLocation,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        ConfigError::Json {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = Result<T, ConfigError>;
