use ds_config::LogLevel;

use std::path::PathBuf;

use clap::Parser;

const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, Clone, Parser)]
#[command(name = "ds-server", version, about = "In-memory document server fixture")]
pub struct Cli {
    /// Shard identity, echoed in logs, /health and the port file
    #[arg(long)]
    pub shard: String,

    /// Directory receiving the port discovery file
    #[arg(long)]
    pub data_dir: PathBuf,

    /// Port to bind; 0 picks a free one
    #[arg(long, default_value_t = 0)]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Delay before the index catches up with a write (milliseconds)
    #[arg(long, default_value_t = 50)]
    pub index_delay_ms: u64,

    /// Delay before binding the listener (milliseconds)
    #[arg(long, default_value_t = 0)]
    pub startup_delay_ms: u64,
}

impl Cli {
    /// Host written to the port file. Wildcard binds advertise loopback.
    pub fn advertised_host(&self) -> &str {
        match self.host.as_str() {
            "0.0.0.0" => "127.0.0.1",
            "::" | "[::]" => "::1",
            host => host,
        }
    }
}
