#![allow(dead_code)]

use ds_driver::DriverConfig;

use std::net::TcpListener;
use std::time::Duration;

/// Route driver logs through the test harness's captured output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ds_driver=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A port that was free a moment ago and is now closed again.
pub fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

/// Launch `/bin/sh -c <script>`. The derived flags land in `$0`, `$1`, ...
/// and are ignored by the script.
pub fn shell_config(script: &str) -> DriverConfig {
    DriverConfig::for_binary("/bin/sh")
        .with_extra_args(["-c", script])
        .with_poll_interval(Duration::from_millis(20))
        .with_shutdown_timeout(Duration::from_secs(2))
}
