#![allow(dead_code)]

use ds_client::{Command, Conventions};
use ds_driver::{DriverConfig, ProcessDriver};

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const NON_STALE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub item1: String,
    pub item2: String,
}

pub fn hello_world() -> Greeting {
    Greeting {
        item1: "hello".to_string(),
        item2: "world".to_string(),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("ds_driver=info,ds_client=info")
            }),
        )
        .with_test_writer()
        .try_init();
}

pub fn server_config() -> DriverConfig {
    DriverConfig::for_binary(env!("CARGO_BIN_EXE_ds-server"))
        .with_startup_timeout(Duration::from_secs(30))
        .with_extra_args(["--log-level", "debug"])
}

/// Start a driver for the fixture server and block until it is ready.
pub fn start_driver(base_name: &str) -> ProcessDriver {
    init_tracing();
    let mut driver = ProcessDriver::new(base_name, server_config());
    driver.start().expect("server should start");
    driver
}

/// The PUT command all three end-to-end scenarios write.
pub fn put_greeting_command(conventions: &Conventions) -> Command {
    Command::put_entity(None, &hello_world(), conventions).expect("greeting is a JSON object")
}
