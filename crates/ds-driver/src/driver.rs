//! Server process lifecycle for one test shard.

use crate::{
    DriverConfig, DriverError, DriverResult, DriverState, LaunchConfig, ProbeTarget, ProcessHandle,
    ProcessLauncher, ProcessOutput, RawHttp, ReadinessProbe, ServerAddress, ShardId, Termination,
    resolve_server_binary,
};

use std::path::Path;

use tracing::{error, info, warn};

/// Drives one out-of-process server through its lifecycle.
///
/// Responsibilities:
/// - Launch the server with a shard-scoped data directory
/// - Wait for readiness and publish the base URL
/// - Terminate the process and remove its data on every exit path
///
/// Teardown runs from [`ProcessDriver::shutdown`] or, failing that, from
/// `Drop`, so a panicking test still stops its server.
pub struct ProcessDriver {
    shard: ShardId,
    config: DriverConfig,
    state: DriverState,
    process: Option<ProcessHandle>,
    address: Option<ServerAddress>,
}

impl ProcessDriver {
    /// Create a driver. Nothing is launched until [`ProcessDriver::start`].
    pub fn new(base_name: &str, config: DriverConfig) -> Self {
        Self {
            shard: ShardId::generate(base_name),
            config,
            state: DriverState::Created,
            process: None,
            address: None,
        }
    }

    /// Launch the server and block until it is ready.
    ///
    /// May be called once. Any later call fails with
    /// [`DriverError::InvalidState`], whatever the outcome of the first.
    pub fn start(&mut self) -> DriverResult<&ServerAddress> {
        if self.state != DriverState::Created {
            return Err(DriverError::invalid_state("start", self.state));
        }
        self.state = DriverState::Starting;
        info!("Starting server for shard {}", self.shard);

        match self.launch_and_wait() {
            Ok(address) => {
                self.state = DriverState::Ready;
                info!("Shard {} ready at {address}", self.shard);
                Ok(self.address.insert(address))
            }
            Err(e) => {
                self.state = DriverState::Failed;
                error!("Shard {} failed to start: {e}", self.shard);
                Err(e)
            }
        }
    }

    fn launch_and_wait(&mut self) -> DriverResult<ServerAddress> {
        self.config.validate()?;

        let binary = resolve_server_binary(self.config.server.binary.as_deref())?;
        let launch = LaunchConfig::new(self.shard.clone(), binary, &self.config.server);
        let probe = ReadinessProbe::new(&self.config.timing)?;

        let handle = self.process.insert(ProcessLauncher::launch(launch)?);

        let target = match handle.config().port {
            Some(port) => ProbeTarget::Fixed(ServerAddress::new(&handle.config().host, port)),
            None => ProbeTarget::Discover {
                data_dir: handle.data_dir().to_path_buf(),
            },
        };

        probe.wait_ready(handle, &target)
    }

    /// Base URL of the ready server, e.g. `http://127.0.0.1:41234/`.
    pub fn url(&self) -> DriverResult<&str> {
        self.address().map(ServerAddress::url)
    }

    pub fn address(&self) -> DriverResult<&ServerAddress> {
        match (self.state, self.address.as_ref()) {
            (DriverState::Ready, Some(address)) => Ok(address),
            (state, _) => Err(DriverError::invalid_state("read the server url", state)),
        }
    }

    /// Raw HTTP helper bound to the ready server.
    pub fn raw_http(&self) -> DriverResult<RawHttp> {
        let address = self.address()?.clone();
        RawHttp::new(address, self.config.timing.request_timeout())
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn shard(&self) -> &ShardId {
        &self.shard
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// PID of the launched server while the driver owns it.
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().map(ProcessHandle::pid)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.process.as_ref().map(ProcessHandle::data_dir)
    }

    /// Tail of the server's stdout/stderr while the driver owns it.
    pub fn captured_output(&self) -> Option<ProcessOutput> {
        self.process.as_ref().map(ProcessHandle::captured_output)
    }

    /// Terminate the server and release its data directory.
    ///
    /// Safe in every state and idempotent: after the first call the driver is
    /// `Disposed` and further calls return `Ok(())`. A process that already
    /// exited is not an error; failing to stop a live one is
    /// [`DriverError::Teardown`].
    pub fn shutdown(&mut self) -> DriverResult<()> {
        if self.state == DriverState::Disposed {
            return Ok(());
        }
        self.state = DriverState::Disposed;
        self.address = None;

        let Some(mut handle) = self.process.take() else {
            info!("Shard {} disposed (no process launched)", self.shard);
            return Ok(());
        };

        let result = handle.terminate(self.config.timing.shutdown_timeout());
        drop(handle);

        match result {
            Ok(Termination::AlreadyExited { code }) => {
                warn!(
                    "Shard {} server had already exited (code {code:?})",
                    self.shard
                );
                Ok(())
            }
            Ok(termination) => {
                info!("Shard {} disposed ({termination:?})", self.shard);
                Ok(())
            }
            Err(e) => {
                error!("Shard {} teardown failed: {e}", self.shard);
                Err(e)
            }
        }
    }
}

impl Drop for ProcessDriver {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!("Failed to tear down shard {} on drop: {e}", self.shard);
        }
    }
}
