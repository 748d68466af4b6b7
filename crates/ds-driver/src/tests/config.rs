use crate::{DriverConfig, DriverError};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, none, ok, some};
use tempfile::TempDir;

#[test]
fn given_default_config_when_inspected_then_uses_ephemeral_port_and_sane_timeouts() {
    let config = DriverConfig::default();

    assert_that!(config.server.host, eq("127.0.0.1"));
    assert_that!(config.server.port, none());
    assert_that!(config.server.shard_flag, eq("--shard"));
    assert_that!(config.server.data_dir_flag, eq("--data-dir"));
    assert_that!(config.server.port_flag, eq("--port"));
    assert_that!(config.timing.startup_timeout(), eq(Duration::from_secs(30)));
    assert_that!(
        config.timing.poll_interval(),
        eq(Duration::from_millis(100))
    );
    assert_that!(config.timing.readiness_path, eq("ready"));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
fn given_builder_methods_when_applied_then_fields_updated() {
    let config = DriverConfig::for_binary("/opt/ds/ds-server")
        .with_fixed_port(9123)
        .with_startup_timeout(Duration::from_millis(750))
        .with_shutdown_timeout(Duration::from_secs(2))
        .with_poll_interval(Duration::from_millis(20))
        .with_extra_args(["--index-delay-ms", "10"])
        .with_env("RUST_BACKTRACE", "1");

    assert_that!(
        config.server.binary.as_deref().map(|p| p.to_string_lossy().into_owned()),
        some(eq("/opt/ds/ds-server"))
    );
    assert_that!(config.server.port, some(eq(9123)));
    assert_that!(config.timing.startup_timeout_ms, eq(750));
    assert_that!(config.timing.shutdown_timeout_ms, eq(2000));
    assert_that!(config.timing.poll_interval_ms, eq(20));
    assert_that!(
        config.server.extra_args,
        eq(&vec!["--index-delay-ms".to_string(), "10".to_string()])
    );
    assert_that!(
        config.server.extra_env.get("RUST_BACKTRACE").cloned(),
        some(eq("1"))
    );
}

#[test]
fn given_partial_toml_when_parsed_then_missing_fields_defaulted() {
    let toml = r#"
        [server]
        port = 18080
        extra_args = ["--log-level", "debug"]

        [timing]
        startup_timeout_ms = 5000
    "#;

    let config = DriverConfig::from_toml_str(toml).unwrap();

    assert_that!(config.server.port, some(eq(18080)));
    assert_that!(config.server.host, eq("127.0.0.1"));
    assert_that!(config.timing.startup_timeout_ms, eq(5000));
    assert_that!(config.timing.poll_interval_ms, eq(100));
}

#[test]
fn given_empty_toml_when_parsed_then_equals_default() {
    let config = DriverConfig::from_toml_str("").unwrap();

    assert_that!(config, eq(&DriverConfig::default()));
}

#[test]
fn given_malformed_toml_when_parsed_then_config_error() {
    let result = DriverConfig::from_toml_str("this is not valid toml {{{{");

    assert!(matches!(result, Err(DriverError::Config { .. })));
}

#[test]
fn given_toml_file_with_invalid_values_when_loaded_then_error_mentions_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("driver.toml");
    std::fs::write(&path, "[timing]\nstartup_timeout_ms = 0\n").unwrap();

    let result = DriverConfig::from_toml_file(&path);

    assert_that!(result, err(anything()));
    let msg = result.unwrap_err().to_string();
    assert_that!(msg, contains_substring("driver.toml"));
    assert_that!(msg, contains_substring("startup_timeout_ms"));
}

#[test]
fn given_missing_toml_file_when_loaded_then_config_error() {
    let temp = TempDir::new().unwrap();

    let result = DriverConfig::from_toml_file(&temp.path().join("absent.toml"));

    assert!(matches!(result, Err(DriverError::Config { .. })));
}

#[test]
fn given_fixed_port_zero_when_validate_then_error() {
    let config = DriverConfig::default().with_fixed_port(0);

    let result = config.validate();

    assert_that!(result, err(anything()));
    assert_that!(
        result.unwrap_err().to_string(),
        contains_substring("server.port")
    );
}

#[test]
fn given_empty_host_or_flag_when_validate_then_error() {
    let mut config = DriverConfig::default();
    config.server.host = " ".into();
    assert_that!(config.validate(), err(anything()));

    let mut config = DriverConfig::default();
    config.server.port_flag = String::new();
    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_zero_poll_interval_when_validate_then_error() {
    let config = DriverConfig::default().with_poll_interval(Duration::ZERO);

    assert_that!(config.validate(), err(anything()));
}
