#![cfg(unix)]

mod common;

use common::{init_tracing, shell_config, unused_port};

use ds_config::is_process_running;
use ds_driver::{DriverError, DriverState, ProcessDriver};

use std::time::{Duration, Instant};

use googletest::prelude::*;

#[test]
fn given_server_that_never_answers_when_start_then_timeout_within_bound() {
    init_tracing();

    // Given: A process that stays alive but never serves HTTP
    let config = shell_config("exec sleep 30")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(500));
    let mut driver = ProcessDriver::new("NeverReady", config);

    // When: Starting the driver
    let start = Instant::now();
    let result = driver.start().map(|_| ());
    let elapsed = start.elapsed();

    // Then: Startup fails with a timeout close to the configured bound
    assert!(matches!(result, Err(DriverError::Timeout { .. })));
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_secs(5));
    assert_that!(driver.state(), eq(DriverState::Failed));

    // And: Teardown still stops the process
    let pid = driver.pid().unwrap();
    driver.shutdown().unwrap();
    assert!(!is_process_running(pid));
}

#[test]
fn given_server_that_exits_during_startup_when_start_then_process_exited_with_output() {
    init_tracing();

    // Given: A process that prints an error and exits shortly after spawn
    let config = shell_config("echo boom >&2; sleep 0.3; exit 3")
        .with_startup_timeout(Duration::from_secs(10));
    let mut driver = ProcessDriver::new("Crashing", config);

    // When: Starting the driver
    let start = Instant::now();
    let result = driver.start().map(|_| ());

    // Then: The exit is reported long before the startup timeout
    assert!(start.elapsed() < Duration::from_secs(5));
    match result {
        Err(DriverError::ProcessExited { code, output, .. }) => {
            assert_that!(code, some(eq(3)));
            assert_that!(output.stderr, contains_substring("boom"));
        }
        other => panic!("expected process exit, got {other:?}"),
    }
    assert_that!(driver.state(), eq(DriverState::Failed));
    driver.shutdown().unwrap();
}

#[test]
fn given_failed_start_when_shutdown_then_data_dir_removed() {
    init_tracing();

    // Given: A driver whose start timed out
    let config = shell_config("exec sleep 30")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(200));
    let mut driver = ProcessDriver::new("Cleanup", config);
    let _ = driver.start();
    let data_dir = driver.data_dir().unwrap().to_path_buf();
    assert!(data_dir.is_dir());

    // When: Shutting down
    driver.shutdown().unwrap();

    // Then: The shard's data directory is gone
    assert!(!data_dir.exists());
    assert!(driver.data_dir().is_none());
}

#[test]
fn given_keep_data_dir_when_shutdown_then_data_dir_survives() {
    init_tracing();

    // Given: A driver configured to keep its data directory
    let mut config = shell_config("echo kept; exec sleep 30")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(200));
    config.server.keep_data_dir = true;
    let mut driver = ProcessDriver::new("Keep", config);
    let _ = driver.start();
    let data_dir = driver.data_dir().unwrap().to_path_buf();

    // When: Shutting down
    driver.shutdown().unwrap();

    // Then: The directory and the captured stdout remain
    assert!(data_dir.is_dir());
    let stdout = std::fs::read_to_string(data_dir.join(ds_driver::STDOUT_LOG)).unwrap();
    assert_that!(stdout, contains_substring("kept"));

    std::fs::remove_dir_all(&data_dir).unwrap();
}

#[test]
fn given_process_ignoring_sigterm_when_shutdown_then_killed_within_grace() {
    init_tracing();

    // Given: A process that ignores SIGTERM
    let config = shell_config("trap '' TERM; while true; do sleep 0.1; done")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(200))
        .with_shutdown_timeout(Duration::from_millis(300));
    let mut driver = ProcessDriver::new("Stubborn", config);
    let _ = driver.start();
    let pid = driver.pid().unwrap();

    // When: Shutting down
    let start = Instant::now();
    let result = driver.shutdown();

    // Then: The process is force-killed shortly after the grace period
    assert_that!(result, ok(anything()));
    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(!is_process_running(pid));
}

#[test]
fn given_started_driver_when_dropped_then_process_stopped() {
    init_tracing();

    // Given: A driver that owns a live process
    let config = shell_config("exec sleep 30")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(200));
    let mut driver = ProcessDriver::new("Dropped", config);
    let _ = driver.start();
    let pid = driver.pid().unwrap();
    let data_dir = driver.data_dir().unwrap().to_path_buf();

    // When: The driver goes out of scope without an explicit shutdown
    drop(driver);

    // Then: Neither the process nor its data directory survive
    assert!(!is_process_running(pid));
    assert!(!data_dir.exists());
}

#[test]
fn given_extra_env_when_start_then_child_sees_variable() {
    init_tracing();

    // Given: An env var passed through the driver config
    let config = shell_config("echo \"value=$DS_TEST_MARKER\"; exec sleep 30")
        .with_fixed_port(unused_port())
        .with_startup_timeout(Duration::from_millis(300))
        .with_env("DS_TEST_MARKER", "shard-env");
    let mut driver = ProcessDriver::new("Env", config);

    // When: Startup runs to its timeout
    let _ = driver.start();

    // Then: The child's stdout shows the variable
    let output = driver.captured_output().unwrap();
    assert_that!(output.stdout, contains_substring("value=shard-env"));
    driver.shutdown().unwrap();
}
