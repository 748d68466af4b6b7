//! Port discovery file.
//!
//! A server started with `--port 0` binds an ephemeral port and then writes
//! this file into its data directory. The harness that spawned it polls for
//! the file to learn the real address.
//!
//! File location: `<data_dir>/server.json`
//!
//! ## Partial reads
//!
//! `write_in()` writes to a sibling temp file and renames it into place, so a
//! reader polling the directory sees either no file or a complete one.
//!
//! ## Stale file detection
//!
//! If the server crashes without cleanup, the file remains. `read_live_in()`
//! checks whether the PID in the file is still running and removes the file
//! when it is not.

use crate::{ConfigError, ConfigErrorResult, port_file::is_process_running};

use std::panic::Location;
use std::path::{Path, PathBuf};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const PORT_FILENAME: &str = "server.json";
const PORT_FILE_TMP_SUFFIX: &str = ".tmp";

/// Information stored in the port discovery file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortFileInfo {
    /// Process ID of the server that wrote this file
    pub pid: u32,
    /// Port the server is listening on
    pub port: u16,
    /// Host the server is bound to
    pub host: String,
    /// Shard identity the server was started with
    pub shard: String,
    /// ISO 8601 timestamp when the server started
    pub started_at: String,
    /// Server version for diagnostics
    pub version: String,
}

impl PortFileInfo {
    /// Describe the current process listening on `host:port`.
    pub fn for_current_process(port: u16, host: &str, shard: &str) -> Self {
        Self {
            pid: std::process::id(),
            port,
            host: host.to_string(),
            shard: shard.to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Base URL clients should use, always with a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    /// Path of the discovery file inside `data_dir`.
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(PORT_FILENAME)
    }

    /// Write the discovery file into `data_dir`.
    ///
    /// Refuses to overwrite a file owned by another live process.
    pub fn write_in(&self, data_dir: &Path) -> ConfigErrorResult<PathBuf> {
        std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::io(data_dir, e))?;

        if let Ok(Some(existing)) = Self::read_live_in(data_dir)
            && existing.pid != self.pid
        {
            return Err(ConfigError::AlreadyRunning {
                pid: existing.pid,
                port: existing.port,
                data_dir: data_dir.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let path = Self::path_in(data_dir);
        let tmp_path = data_dir.join(format!("{PORT_FILENAME}{PORT_FILE_TMP_SUFFIX}"));

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::json(&path, e))?;
        std::fs::write(&tmp_path, content).map_err(|e| ConfigError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| ConfigError::io(&path, e))?;

        Ok(path)
    }

    /// Read the discovery file from `data_dir`.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn read_in(data_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let path = Self::path_in(data_dir);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::json(&path, e))
    }

    /// Read the discovery file and verify the writer is still alive.
    ///
    /// A file left behind by a dead process is removed and `None` returned.
    pub fn read_live_in(data_dir: &Path) -> ConfigErrorResult<Option<PortFileInfo>> {
        let info = match Self::read_in(data_dir)? {
            Some(info) => info,
            None => return Ok(None),
        };

        if is_process_running(info.pid) {
            Ok(Some(info))
        } else {
            log::debug!(
                "Removing stale port file (pid {} no longer running)",
                info.pid
            );
            let _ = Self::remove_in(data_dir);
            Ok(None)
        }
    }

    /// Delete the discovery file. Succeeds if it does not exist.
    pub fn remove_in(data_dir: &Path) -> ConfigErrorResult<()> {
        let path = Self::path_in(data_dir);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| ConfigError::io(&path, e))?;
        }
        Ok(())
    }
}
