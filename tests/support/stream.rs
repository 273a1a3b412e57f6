//! Recorded stream-log fixtures.
//!
//! Market 1.2345 starts at 2024-03-02 15:00:00 UTC with runners 101 and 102.
//! Two minutes out runner 101 takes most of the traded stake at an average
//! of 2.2 while offering 2.5, which is a consensus signal.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};

pub const START_MS: i64 = 1_709_391_600_000;
pub const MARKET_ID: &str = "1.2345";

fn definition(in_play: bool, status: &str, runners: Value) -> Value {
    json!({
        "marketType": "WIN",
        "marketTime": "2024-03-02T15:00:00.000Z",
        "countryCode": "GB",
        "inPlay": in_play,
        "status": status,
        "runners": runners,
    })
}

fn line(offset_seconds: i64, change: Value) -> String {
    let mut change = change;
    change["id"] = json!(MARKET_ID);
    json!({
        "op": "mcm",
        "pt": START_MS + offset_seconds * 1000,
        "mc": [change],
    })
    .to_string()
}

pub fn opening_definition() -> String {
    let runners = json!([{"id": 101, "status": "ACTIVE"}, {"id": 102, "status": "ACTIVE"}]);
    line(-400, json!({ "marketDefinition": definition(false, "OPEN", runners) }))
}

pub fn consensus_prices() -> String {
    line(
        -120,
        json!({ "rc": [
            {"id": 101, "atb": [[2.5, 400.0], [2.48, 900.0]], "atl": [[2.54, 300.0]], "trd": [[2.2, 25000.0]]},
            {"id": 102, "atb": [[5.0, 150.0]], "atl": [[5.2, 80.0]], "trd": [[5.0, 5000.0]]}
        ]}),
    )
}

pub fn lay_update() -> String {
    line(-60, json!({ "rc": [{"id": 101, "atl": [[2.54, 0.0], [2.56, 120.0]]}] }))
}

pub fn going_in_play() -> String {
    let runners = json!([{"id": 101, "status": "ACTIVE"}, {"id": 102, "status": "ACTIVE"}]);
    line(5, json!({ "marketDefinition": definition(true, "OPEN", runners) }))
}

pub fn settlement() -> String {
    let runners = json!([{"id": 101, "status": "WINNER"}, {"id": 102, "status": "LOSER"}]);
    line(6, json!({ "marketDefinition": definition(true, "CLOSED", runners) }))
}

/// Every line from the opening definition through settlement.
pub fn settled_market() -> Vec<String> {
    vec![
        opening_definition(),
        consensus_prices(),
        lay_update(),
        going_in_play(),
        settlement(),
    ]
}

/// A recording that stops two minutes before the start.
pub fn unsettled_market() -> Vec<String> {
    vec![opening_definition(), consensus_prices(), lay_update()]
}

pub fn write_log(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, lines.join("\n")).expect("write log");
    path
}

pub fn write_gz_log(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(lines.join("\n").as_bytes())
        .expect("compress log");
    std::fs::write(&path, encoder.finish().expect("finish gzip")).expect("write log");
    path
}

pub const CONFIG_TOML: &str = r#"
[logging]
level = "warn"
format = "pretty"
"#;

pub fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, CONFIG_TOML).expect("write config");
    path
}
