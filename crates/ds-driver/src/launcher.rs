//! Spawning the server process.

use crate::{DriverError, DriverResult, LaunchConfig, ProcessHandle, resolve_executable};

use std::fs::File;
use std::panic::Location;
use std::process::{Command, Stdio};

use error_location::ErrorLocation;
use tracing::{debug, info};

/// File inside the data directory receiving the server's stdout.
pub const STDOUT_LOG: &str = "stdout.log";

/// File inside the data directory receiving the server's stderr.
pub const STDERR_LOG: &str = "stderr.log";

pub struct ProcessLauncher;

impl ProcessLauncher {
    /// Spawn the server described by `config`.
    ///
    /// Creates a fresh data directory named after the shard, redirects the
    /// child's stdout/stderr into it and returns the owning handle. A child
    /// that is already gone right after spawning is reported as
    /// [`DriverError::Launch`] together with whatever it printed.
    pub fn launch(config: LaunchConfig) -> DriverResult<ProcessHandle> {
        let binary = resolve_executable(&config.binary)?;

        let data_dir = Self::create_data_dir(&config)?;
        let data_path = data_dir.path().to_path_buf();
        let stdout_path = data_path.join(STDOUT_LOG);
        let stderr_path = data_path.join(STDERR_LOG);

        let stdout = File::create(&stdout_path).map_err(|e| {
            DriverError::launch(&binary, format!("Failed to create {STDOUT_LOG}: {e}"))
        })?;
        let stderr = File::create(&stderr_path).map_err(|e| {
            DriverError::launch(&binary, format!("Failed to create {STDERR_LOG}: {e}"))
        })?;

        let args = config.args(&data_path);
        debug!("Launching {} {:?}", binary.display(), args);

        let mut cmd = Command::new(&binary);
        cmd.args(&args)
            .current_dir(&data_path)
            .envs(config.extra_env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));

        let child = cmd.spawn().map_err(|e| {
            DriverError::launch(&binary, format!("Failed to spawn server process: {e}"))
        })?;

        info!(
            "Spawned server for shard {} (PID {}) in {}",
            config.shard,
            child.id(),
            data_path.display()
        );

        let mut handle = ProcessHandle::new(child, config, data_dir, stdout_path, stderr_path);

        if let Some(status) = handle.try_exit_status()? {
            return Err(DriverError::Launch {
                binary,
                message: format!("server process exited immediately ({status})"),
                output: handle.captured_output(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(handle)
    }

    fn create_data_dir(config: &LaunchConfig) -> DriverResult<tempfile::TempDir> {
        let prefix = format!("{}-", config.shard);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let result = match config.data_root {
            Some(ref root) => std::fs::create_dir_all(root).and_then(|_| builder.tempdir_in(root)),
            None => builder.tempdir(),
        };

        result.map_err(|e| {
            DriverError::launch(
                &config.binary,
                format!(
                    "Failed to create data directory for shard {}: {e}",
                    config.shard
                ),
            )
        })
    }
}
