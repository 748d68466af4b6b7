//! Driver configuration with defaults and validation.

use crate::{DriverError, DriverResult, ServerSettings, TimingSettings};

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_SHARD_FLAG: &str = "--shard";
const DEFAULT_DATA_DIR_FLAG: &str = "--data-dir";
const DEFAULT_PORT_FLAG: &str = "--port";
const DEFAULT_HOST_FLAG: &str = "--host";
const DEFAULT_READINESS_PATH: &str = "ready";
const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
const DEFAULT_PROBE_REQUEST_TIMEOUT_MS: u64 = 1_000;
const DEFAULT_SHUTDOWN_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Everything a [`crate::ProcessDriver`] needs besides the shard base name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// How the server process is launched
    #[serde(default)]
    pub server: ServerSettings,

    /// Readiness and teardown timing
    #[serde(default)]
    pub timing: TimingSettings,
}

impl DriverConfig {
    /// Default configuration launching the given server binary.
    pub fn for_binary(binary: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.server.binary = Some(binary.into());
        config
    }

    /// Bind the server to a fixed port instead of an ephemeral one.
    pub fn with_fixed_port(mut self, port: u16) -> Self {
        self.server.port = Some(port);
        self
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.timing.startup_timeout_ms = duration_ms(timeout);
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.timing.shutdown_timeout_ms = duration_ms(timeout);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.timing.poll_interval_ms = duration_ms(interval);
        self
    }

    /// Arguments placed before the derived `--shard/--data-dir/--port` flags.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.server
            .extra_args
            .extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.server.extra_env.insert(key.into(), value.into());
        self
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> DriverResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DriverError::config(format!("Invalid driver config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn from_toml_file(path: &Path) -> DriverResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DriverError::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            DriverError::Config { message, .. } => {
                DriverError::config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Reject settings that would make `start()` hang or misbehave.
    pub fn validate(&self) -> DriverResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(DriverError::config("server.host must not be empty"));
        }
        if self.server.port == Some(0) {
            return Err(DriverError::config(
                "server.port = 0 is not a fixed port; leave it unset for an ephemeral port",
            ));
        }
        for (name, flag) in [
            ("server.shard_flag", &self.server.shard_flag),
            ("server.data_dir_flag", &self.server.data_dir_flag),
            ("server.port_flag", &self.server.port_flag),
        ] {
            if flag.trim().is_empty() {
                return Err(DriverError::config(format!("{name} must not be empty")));
            }
        }
        for (name, value) in [
            ("timing.startup_timeout_ms", self.timing.startup_timeout_ms),
            ("timing.poll_interval_ms", self.timing.poll_interval_ms),
            ("timing.probe_request_timeout_ms", self.timing.probe_request_timeout_ms),
            ("timing.shutdown_timeout_ms", self.timing.shutdown_timeout_ms),
            ("timing.request_timeout_ms", self.timing.request_timeout_ms),
        ] {
            if value == 0 {
                return Err(DriverError::config(format!("{name} must be greater than 0")));
            }
        }
        Ok(())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_shard_flag() -> String {
    DEFAULT_SHARD_FLAG.to_string()
}

pub(crate) fn default_data_dir_flag() -> String {
    DEFAULT_DATA_DIR_FLAG.to_string()
}

pub(crate) fn default_port_flag() -> String {
    DEFAULT_PORT_FLAG.to_string()
}

pub(crate) fn default_host_flag() -> Option<String> {
    Some(DEFAULT_HOST_FLAG.to_string())
}

pub(crate) fn default_readiness_path() -> String {
    DEFAULT_READINESS_PATH.to_string()
}

pub(crate) fn default_startup_timeout() -> u64 {
    DEFAULT_STARTUP_TIMEOUT_MS
}

pub(crate) fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_probe_request_timeout() -> u64 {
    DEFAULT_PROBE_REQUEST_TIMEOUT_MS
}

pub(crate) fn default_shutdown_timeout() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_MS
}

pub(crate) fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}
