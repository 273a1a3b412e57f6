mod support;

use assert_cmd::Command;
use predicates::prelude::*;

use support::stream::{settled_market, unsettled_market, write_config, write_gz_log, write_log};

fn laybook() -> Command {
    Command::cargo_bin("laybook").expect("binary built")
}

#[test]
fn config_validate_accepts_a_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    laybook()
        .args(["config", "validate", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[logging]\nlevel = \"info\"\nformat = \"pretty\"\n[risk]\nmax_fraction = 1.5\n",
    )
    .unwrap();

    laybook()
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_fraction"));
}

#[test]
fn cli_returns_nonzero_on_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    laybook()
        .args(["config", "show", "--config"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure();
}

#[test]
fn replay_prints_a_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let log = write_gz_log(dir.path(), "1.2345.json.gz", &settled_market());

    laybook()
        .arg("--config")
        .arg(&config)
        .args(["--json", "replay"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"final_state\":\"closed\""))
        .stdout(predicate::str::contains("\"winner\":101"));
}

#[test]
fn replay_fails_on_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    laybook()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure();
}

#[test]
fn replay_warns_when_the_log_has_no_settlement() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let log = write_log(dir.path(), "1.2345", &unsettled_market());

    laybook()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("No settlement recorded"))
        .stdout(predicate::str::contains("exhausted"));
}
