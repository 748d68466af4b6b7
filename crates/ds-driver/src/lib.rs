//! Out-of-process server driver for integration tests.
//!
//! A [`ProcessDriver`] launches one `ds-server` (or compatible) process per
//! shard, waits until it answers its readiness endpoint, publishes the base
//! URL and tears the process down again on every exit path.
//!
//! ```no_run
//! use ds_driver::{DriverConfig, ProcessDriver};
//!
//! let mut driver = ProcessDriver::new("HelloShard", DriverConfig::default());
//! driver.start()?;
//! println!("server ready at {}", driver.url()?);
//! # Ok::<(), ds_driver::DriverError>(())
//! ```

mod binary;
mod config;
mod driver;
mod driver_state;
mod error;
mod launch_config;
mod launcher;
mod probe;
mod process_handle;
mod process_output;
mod raw_http;
mod server_address;
mod server_settings;
mod shard_id;
mod termination;
mod timing_settings;

#[cfg(test)]
mod tests;

pub use binary::{SERVER_BINARY_ENV, SERVER_BINARY_NAME, resolve_executable, resolve_server_binary};
pub use config::DriverConfig;
pub use driver::ProcessDriver;
pub use driver_state::DriverState;
pub use error::{DriverError, Result as DriverResult};
pub use launch_config::LaunchConfig;
pub use launcher::{ProcessLauncher, STDERR_LOG, STDOUT_LOG};
pub use probe::{ProbeTarget, ReadinessProbe};
pub use process_handle::ProcessHandle;
pub use process_output::{MAX_CAPTURED_BYTES, ProcessOutput};
pub use raw_http::RawHttp;
pub use server_address::ServerAddress;
pub use server_settings::ServerSettings;
pub use shard_id::ShardId;
pub use termination::Termination;
pub use timing_settings::TimingSettings;
