use crate::error::{Result as ServerErrorResult, ServerError};

use std::time::SystemTime;

use fern::Dispatch;
use log::info;

/// Initialize the stdout logger.
///
/// Output goes to stdout without colors; the driver redirects it into the
/// shard's `stdout.log`.
pub fn initialize(log_level: ds_config::LogLevel) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    Dispatch::new()
        .level(level_filter)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    info!("Logger initialized: level={level_filter:?}, stdout");
    Ok(())
}
