use crate::config::{
    default_poll_interval, default_probe_request_timeout, default_readiness_path,
    default_request_timeout, default_shutdown_timeout, default_startup_timeout,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Upper bound for launch plus readiness (milliseconds)
    #[serde(default = "default_startup_timeout")]
    pub startup_timeout_ms: u64,

    /// Delay between readiness attempts (milliseconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Timeout of a single readiness request (milliseconds), cut short by
    /// whatever remains of the startup timeout
    #[serde(default = "default_probe_request_timeout")]
    pub probe_request_timeout_ms: u64,

    /// Grace period between SIGTERM and SIGKILL on teardown (milliseconds)
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_ms: u64,

    /// Timeout for raw requests made through the driver (milliseconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Path probed for readiness, relative to the base URL
    #[serde(default = "default_readiness_path")]
    pub readiness_path: String,
}

impl TimingSettings {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn probe_request_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            startup_timeout_ms: default_startup_timeout(),
            poll_interval_ms: default_poll_interval(),
            probe_request_timeout_ms: default_probe_request_timeout(),
            shutdown_timeout_ms: default_shutdown_timeout(),
            request_timeout_ms: default_request_timeout(),
            readiness_path: default_readiness_path(),
        }
    }
}
