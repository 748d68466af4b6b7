//! Contract shared between the `ds-server` fixture and the `ds-driver`
//! harness: the port discovery file, process liveness, log level parsing
//! and document metadata keys.

mod error;
mod log_level;
mod metadata;
mod port_file;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use metadata::{ENTITY_NAME_KEY, RUST_TYPE_KEY};
pub use port_file::is_process_running;
pub use port_file::port_file_info::{PORT_FILENAME, PortFileInfo};

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
