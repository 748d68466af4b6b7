use crate::Cli;

use std::path::PathBuf;

use clap::Parser;
use googletest::prelude::*;
use log::LevelFilter;

#[test]
fn given_required_flags_when_parsed_then_defaults_applied() {
    let args = ["ds-server", "--shard", "s-1-0", "--data-dir", "/tmp/d"];

    let cli = Cli::try_parse_from(args).unwrap();

    assert_that!(cli.shard, eq("s-1-0"));
    assert_that!(cli.data_dir, eq(&PathBuf::from("/tmp/d")));
    assert_that!(cli.port, eq(0));
    assert_that!(cli.host, eq("127.0.0.1"));
    assert_that!(cli.log_level.0, eq(LevelFilter::Info));
    assert_that!(cli.index_delay_ms, eq(50));
    assert_that!(cli.startup_delay_ms, eq(0));
}

#[test]
fn given_all_flags_when_parsed_then_values_read() {
    let cli = Cli::try_parse_from([
        "ds-server",
        "--shard",
        "s",
        "--data-dir",
        "d",
        "--port",
        "8123",
        "--host",
        "0.0.0.0",
        "--log-level",
        "debug",
        "--index-delay-ms",
        "5",
        "--startup-delay-ms",
        "250",
    ])
    .unwrap();

    assert_that!(cli.port, eq(8123));
    assert_that!(cli.log_level.0, eq(LevelFilter::Debug));
    assert_that!(cli.index_delay_ms, eq(5));
    assert_that!(cli.startup_delay_ms, eq(250));
    assert_that!(cli.advertised_host(), eq("127.0.0.1"));
}

#[test]
fn given_missing_shard_when_parsed_then_error() {
    let result = Cli::try_parse_from(["ds-server", "--data-dir", "d"]);

    assert!(result.is_err());
}
