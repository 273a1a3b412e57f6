use std::fs;
use std::path::PathBuf;

use laybook::error::{ConfigError, Error};
use laybook::infrastructure::config::settings::Config;
use laybook::infrastructure::runtime::ScheduleSettings;
use rust_decimal_macros::dec;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

fn expect_invalid(toml: &str, expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, toml);
    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) if field == expected => {}
        Err(err) => panic!("Expected invalid {expected}, got {err}"),
        Ok(_) => panic!("Expected invalid {expected}, config loaded"),
    }
}

#[test]
fn full_config_loads_from_file() {
    let toml = r#"
dry_run = true

[logging]
level = "laybook=debug,info"
format = "json"

[exchange]
api_url = "https://api.example.com/exchange/betting/json-rpc/v1"
login_url = "https://identity.example.com/api/login"
event_type_id = "4339"
countries = ["AU"]
poll_interval_ms = 2000
lookahead_minutes = 5
max_concurrent_markets = 3

[exchange.http]
timeout_ms = 1000
retry_max_attempts = 1

[model]
restricted_jurisdiction = "IE"
consensus_min_share = 0.7

[risk]
bankroll = "2500"
min_size = "2"
kelly_fraction = 0.25
max_fraction = 0.02
commission_discount = 0.4
"#;
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(write_temp_config(&dir, toml)).unwrap();

    assert!(config.dry_run);
    assert_eq!(config.exchange.event_type_id, "4339");
    assert_eq!(config.exchange.http.timeout_ms, 1000);
    assert_eq!(config.exchange.http.retry_max_attempts, 1);
    assert_eq!(config.model_settings().restricted_jurisdiction, "IE");
    assert_eq!(config.model_settings().consensus_min_share, 0.7);

    let risk = config.risk_settings();
    assert_eq!(risk.bankroll, dec!(2500));
    assert_eq!(risk.min_size, dec!(2));
    assert_eq!(risk.kelly_fraction, 0.25);
    assert_eq!(risk.max_fraction, 0.02);
    assert!((config.commission().rate() - 0.03).abs() < 1e-12);

    let schedule = ScheduleSettings::from(&config.exchange);
    assert_eq!(schedule.max_concurrent_markets, 3);
    assert_eq!(schedule.lookahead, chrono::Duration::minutes(5));
    assert_eq!(schedule.refresh, std::time::Duration::from_secs(60));
}

#[test]
fn config_rejects_min_size_above_bankroll() {
    expect_invalid(
        "[logging]\nlevel = \"info\"\nformat = \"pretty\"\n[risk]\nbankroll = \"10\"\nmin_size = \"10\"\n",
        "min_size",
    );
}

#[test]
fn config_rejects_zero_poll_interval() {
    expect_invalid(
        "[logging]\nlevel = \"info\"\nformat = \"pretty\"\n[exchange]\npoll_interval_ms = 0\n",
        "poll_interval_ms",
    );
}

#[test]
fn config_rejects_non_positive_kelly_fraction() {
    expect_invalid(
        "[logging]\nlevel = \"info\"\nformat = \"pretty\"\n[risk]\nkelly_fraction = 0.0\n",
        "kelly_fraction",
    );
}

#[test]
fn config_rejects_empty_event_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        "[logging]\nlevel = \"info\"\nformat = \"pretty\"\n[exchange]\nevent_type_id = \"\"\n",
    );
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::MissingField {
            field: "event_type_id"
        }))
    ));
}

#[test]
fn unknown_log_format_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[logging]\nlevel = \"info\"\nformat = \"xml\"\n");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
