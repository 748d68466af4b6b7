//! Readiness polling against a freshly spawned server.

use crate::{DriverError, DriverResult, ProcessHandle, ServerAddress, TimingSettings};

use std::panic::Location;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use ds_config::PortFileInfo;
use error_location::ErrorLocation;
use reqwest::blocking::Client;
use tracing::{debug, info};

/// Where the probe should look for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeTarget {
    /// Probe a known address (fixed port)
    Fixed(ServerAddress),
    /// Wait for the server's port discovery file in `data_dir`, then probe
    /// the address it names
    Discover { data_dir: PathBuf },
}

/// Polls the readiness endpoint until it answers, the child exits, or the
/// startup timeout elapses.
pub struct ReadinessProbe {
    client: Client,
    readiness_path: String,
    poll_interval: Duration,
    request_timeout: Duration,
    timeout: Duration,
}

impl ReadinessProbe {
    pub fn new(timing: &TimingSettings) -> DriverResult<Self> {
        let client = Client::builder()
            .timeout(timing.probe_request_timeout())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            readiness_path: timing.readiness_path.clone(),
            poll_interval: timing.poll_interval(),
            request_timeout: timing.probe_request_timeout(),
            timeout: timing.startup_timeout(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One readiness request. `Err` carries a description for diagnostics.
    pub fn check(&self, address: &ServerAddress) -> Result<(), String> {
        self.check_within(address, self.request_timeout)
    }

    /// One readiness request that gives up after `limit`, or earlier if the
    /// per-request timeout is shorter.
    fn check_within(&self, address: &ServerAddress, limit: Duration) -> Result<(), String> {
        let url = address.join(&self.readiness_path);
        let request = self
            .client
            .get(&url)
            .timeout(self.request_timeout.min(limit));
        match request.send() {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(format!("GET {url} returned HTTP {}", resp.status())),
            Err(e) => Err(format!("GET {url} failed: {e}")),
        }
    }

    /// Block until the server behind `handle` is ready.
    ///
    /// Every iteration first checks whether the child exited, then whether
    /// the timeout elapsed, then makes one attempt. The first condition that
    /// holds decides the outcome.
    pub fn wait_ready(
        &self,
        handle: &mut ProcessHandle,
        target: &ProbeTarget,
    ) -> DriverResult<ServerAddress> {
        let start = Instant::now();
        let mut address = match target {
            ProbeTarget::Fixed(address) => Some(address.clone()),
            ProbeTarget::Discover { .. } => None,
        };
        let mut last_error = String::from("no probe attempted");
        let mut attempts: u32 = 0;

        loop {
            if let Some(status) = handle.try_exit_status()? {
                return Err(DriverError::ProcessExited {
                    code: status.code(),
                    output: handle.captured_output(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            if start.elapsed() >= self.timeout {
                return Err(DriverError::Timeout {
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    last_error,
                    output: handle.captured_output(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            if address.is_none()
                && let ProbeTarget::Discover { data_dir } = target
            {
                match PortFileInfo::read_in(data_dir) {
                    Ok(Some(info)) if info.pid == handle.pid() => {
                        debug!("Discovered port {} for PID {}", info.port, info.pid);
                        address = Some(ServerAddress::new(&info.host, info.port));
                    }
                    Ok(Some(info)) => {
                        last_error = format!(
                            "port file written by PID {}, expected {}",
                            info.pid,
                            handle.pid()
                        );
                    }
                    Ok(None) => last_error = String::from("port file not written yet"),
                    Err(e) => last_error = e.to_string(),
                }
            }

            if let Some(ref candidate) = address {
                let remaining = self.timeout.saturating_sub(start.elapsed());
                if remaining.is_zero() {
                    continue;
                }
                attempts += 1;
                match self.check_within(candidate, remaining) {
                    Ok(()) => {
                        info!(
                            "Server ready at {candidate} after {}ms ({attempts} attempts)",
                            start.elapsed().as_millis()
                        );
                        return Ok(candidate.clone());
                    }
                    Err(e) => last_error = e,
                }
            }

            let remaining = self.timeout.saturating_sub(start.elapsed());
            thread::sleep(self.poll_interval.min(remaining));
        }
    }
}
