use ds_server::{Cli, logger};

use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logger::initialize(cli.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match ds_server::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
