//! Stream-log line format.
//!
//! Each line is one market-change message:
//! ```json
//! {"op":"mcm","pt":1709391300000,"mc":[{"id":"1.2345",
//!  "marketDefinition":{"marketType":"WIN","marketTime":"2024-03-02T15:00:00.000Z",
//!   "inPlay":false,"status":"OPEN","runners":[{"id":101,"status":"ACTIVE"}]},
//!  "rc":[{"id":101,"atb":[[3.45,20.0]],"spn":3.4}]}]}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::domain::book::parse_timestamp;
use crate::domain::id::{MarketId, OutcomeId};
use crate::domain::stream::{
    DeltaChangeRecord, LevelDelta, MarketDefinition, RunnerChange, RunnerDefinition, RunnerStatus,
};

#[derive(Debug, Clone, Deserialize)]
pub struct StreamLine {
    pub pt: i64,
    #[serde(default)]
    pub mc: Vec<MarketChange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketChange {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub market_definition: Option<RawMarketDefinition>,
    #[serde(default)]
    pub rc: Vec<RawRunnerChange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMarketDefinition {
    #[serde(default)]
    pub market_type: Option<String>,
    #[serde(default)]
    pub market_time: Option<String>,
    #[serde(default)]
    pub in_play: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub runners: Vec<RawRunnerDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunnerDefinition {
    pub id: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub removal_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRunnerChange {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub atb: Vec<[f64; 2]>,
    #[serde(default)]
    pub atl: Vec<[f64; 2]>,
    #[serde(default)]
    pub trd: Vec<[f64; 2]>,
    #[serde(default)]
    pub spb: Vec<[f64; 2]>,
    #[serde(default)]
    pub spl: Vec<[f64; 2]>,
    #[serde(default)]
    pub spn: Option<Value>,
}

fn levels(raw: &[[f64; 2]]) -> Vec<LevelDelta> {
    raw.iter().map(|[price, size]| (*price, *size)).collect()
}

impl From<&RawRunnerChange> for RunnerChange {
    fn from(raw: &RawRunnerChange) -> Self {
        Self {
            id: raw.id.map(OutcomeId::new),
            available_to_back: levels(&raw.atb),
            available_to_lay: levels(&raw.atl),
            traded: levels(&raw.trd),
            sp_back_taken: levels(&raw.spb),
            sp_lay_taken: levels(&raw.spl),
            // "NaN" / "Infinity" sentinels carry no usable price
            sp_near_price: raw
                .spn
                .as_ref()
                .map(|value| value.as_f64().unwrap_or(f64::NAN)),
        }
    }
}

impl From<&RawRunnerDefinition> for RunnerDefinition {
    fn from(raw: &RawRunnerDefinition) -> Self {
        Self {
            id: OutcomeId::new(raw.id),
            status: raw
                .status
                .as_deref()
                .map_or(RunnerStatus::Other, RunnerStatus::parse),
            removal_date: raw
                .removal_date
                .as_deref()
                .and_then(parse_timestamp)
                .map(|date| date.timestamp()),
        }
    }
}

impl From<&RawMarketDefinition> for MarketDefinition {
    fn from(raw: &RawMarketDefinition) -> Self {
        Self {
            market_type: raw.market_type.clone(),
            market_time: raw.market_time.as_deref().and_then(parse_timestamp),
            in_play: raw.in_play,
            status: raw.status.clone(),
            country_code: raw.country_code.clone(),
            runners: raw.runners.iter().map(RunnerDefinition::from).collect(),
        }
    }
}

impl StreamLine {
    /// The first market change as a domain record. Lines without one carry
    /// nothing to replay.
    #[must_use]
    pub fn to_record(&self) -> Option<DeltaChangeRecord> {
        let change = self.mc.first()?;
        Some(DeltaChangeRecord {
            process_time_ms: self.pt,
            market_id: change.id.clone().map(MarketId::new),
            definition: change.market_definition.as_ref().map(MarketDefinition::from),
            runner_changes: change.rc.iter().map(RunnerChange::from).collect(),
        })
    }
}
