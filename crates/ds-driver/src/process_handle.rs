//! Exclusive ownership of a spawned server process.

use crate::{DriverError, DriverResult, LaunchConfig, ProcessOutput, Termination};

use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tracing::{debug, info, warn};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Owns the child process and its data directory.
///
/// Dropping the handle kills a still-running child and removes the data
/// directory (unless `keep_data_dir` was requested).
pub struct ProcessHandle {
    child: Child,
    pid: u32,
    exit_status: Option<ExitStatus>,
    config: LaunchConfig,
    data_dir: Option<TempDir>,
    data_path: PathBuf,
    stdout_path: PathBuf,
    stderr_path: PathBuf,
}

impl ProcessHandle {
    pub(crate) fn new(
        child: Child,
        config: LaunchConfig,
        data_dir: TempDir,
        stdout_path: PathBuf,
        stderr_path: PathBuf,
    ) -> Self {
        Self {
            pid: child.id(),
            child,
            exit_status: None,
            config,
            data_path: data_dir.path().to_path_buf(),
            data_dir: Some(data_dir),
            stdout_path,
            stderr_path,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_path
    }

    /// Exit status if the process has finished, without blocking.
    ///
    /// The status is cached: once reaped, the OS pid may be reused, so the
    /// handle never touches it again.
    pub fn try_exit_status(&mut self) -> DriverResult<Option<ExitStatus>> {
        if self.exit_status.is_none() {
            self.exit_status = self.child.try_wait()?;
        }
        Ok(self.exit_status)
    }

    pub fn has_exited(&mut self) -> bool {
        matches!(self.try_exit_status(), Ok(Some(_)))
    }

    /// Current tail of the process's stdout/stderr.
    pub fn captured_output(&self) -> ProcessOutput {
        ProcessOutput::read_from(&self.stdout_path, &self.stderr_path)
    }

    /// Stop the process: SIGTERM, wait up to `grace`, then kill.
    ///
    /// A process that already exited is not an error. Failing to signal or
    /// kill a live process is reported as [`DriverError::Teardown`].
    pub fn terminate(&mut self, grace: Duration) -> DriverResult<Termination> {
        let already = self
            .try_exit_status()
            .map_err(|e| DriverError::teardown(self.pid, e.to_string()))?;
        if let Some(status) = already {
            debug!("Server process {} already exited ({status})", self.pid);
            return Ok(Termination::AlreadyExited {
                code: status.code(),
            });
        }

        self.request_stop()?;

        if let Some(status) = self.wait_for_exit(grace)? {
            info!("Server process {} stopped ({status})", self.pid);
            return Ok(Termination::Graceful {
                code: status.code(),
            });
        }

        warn!(
            "Server process {} did not stop within {}ms, killing",
            self.pid,
            grace.as_millis()
        );
        self.force_kill()?;
        Ok(Termination::Killed)
    }

    /// Ask the process to stop. Only called while the child is unreaped, so
    /// the pid still refers to our process.
    #[cfg(unix)]
    fn request_stop(&mut self) -> DriverResult<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let raw = i32::try_from(self.pid)
            .map_err(|_| DriverError::teardown(self.pid, "pid out of range"))?;

        debug!("Sending SIGTERM to pid {}", self.pid);
        match kill(Pid::from_raw(raw), Signal::SIGTERM) {
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(errno) => Err(DriverError::teardown(
                self.pid,
                format!("SIGTERM failed: {errno}"),
            )),
        }
    }

    /// No portable graceful signal; go straight to the grace-period wait
    /// and kill.
    #[cfg(not(unix))]
    fn request_stop(&mut self) -> DriverResult<()> {
        Ok(())
    }

    fn wait_for_exit(&mut self, timeout: Duration) -> DriverResult<Option<ExitStatus>> {
        let start = Instant::now();
        loop {
            let status = self
                .try_exit_status()
                .map_err(|e| DriverError::teardown(self.pid, e.to_string()))?;
            if status.is_some() {
                return Ok(status);
            }
            if start.elapsed() >= timeout {
                return Ok(None);
            }
            let remaining = timeout.saturating_sub(start.elapsed());
            thread::sleep(EXIT_POLL_INTERVAL.min(remaining));
        }
    }

    fn force_kill(&mut self) -> DriverResult<()> {
        if let Err(e) = self.child.kill() {
            // InvalidInput: the child exited between our last poll and kill().
            if e.kind() != std::io::ErrorKind::InvalidInput {
                return Err(DriverError::teardown(self.pid, format!("kill failed: {e}")));
            }
        }

        let status = self
            .child
            .wait()
            .map_err(|e| DriverError::teardown(self.pid, format!("wait failed: {e}")))?;
        self.exit_status = Some(status);
        Ok(())
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if !self.has_exited() {
            warn!(
                "Dropping handle of running server process {}, killing",
                self.pid
            );
            if let Err(e) = self.force_kill() {
                warn!("{e}");
            }
        }

        if let Some(dir) = self.data_dir.take() {
            if self.config.keep_data_dir {
                let kept = dir.keep();
                info!("Keeping data directory {}", kept.display());
            } else if let Err(e) = dir.close() {
                warn!(
                    "Failed to remove data directory {}: {e}",
                    self.data_path.display()
                );
            }
        }
    }
}
