use crate::LogLevel;

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::eq;
use log::LevelFilter;

#[test]
fn given_known_level_names_when_parsed_then_map_to_filters() {
    let cases = [
        ("off", LevelFilter::Off),
        ("ERROR", LevelFilter::Error),
        ("Warn", LevelFilter::Warn),
        (" debug ", LevelFilter::Debug),
        ("trace", LevelFilter::Trace),
    ];

    for (input, expected) in cases {
        let Ok(level) = LogLevel::from_str(input);
        assert_that!(level.0, eq(expected));
    }
}

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    let Ok(level) = LogLevel::from_str("chatty");

    assert_that!(*level, eq(LevelFilter::Info));
}

#[test]
fn given_level_in_json_when_deserialized_then_uses_lenient_parsing() {
    let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
    assert_that!(level.0, eq(LevelFilter::Debug));

    let fallback: LogLevel = serde_json::from_str("\"nonsense\"").unwrap();
    assert_that!(fallback, eq(LogLevel::default()));
}

#[test]
fn given_level_when_displayed_then_lowercase() {
    assert_that!(LogLevel(LevelFilter::Warn).to_string(), eq("warn"));
}
