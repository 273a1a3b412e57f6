//! Raw market book payload as polled from the venue.
//!
//! These types mirror the venue's JSON shape loosely: nearly every field is
//! optional because partial and truncated payloads are routine. Turning them
//! into [`MarketSnapshot`](super::snapshot::MarketSnapshot)s is the job of
//! the snapshot adapter, which applies all defaults.
//!
//! Example line:
//! ```json
//! {"et":"2024-03-02T14:59:55Z","marketStartTime":"2024-03-02T15:00:00Z",
//!  "marketInfo":[{"inplay":false,"runners":[{"selectionId":101,
//!  "sp":{"nearPrice":3.4},"ex":{"availableToBack":[{"price":3.45,"size":20.0}]}}]}]}
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parse a venue timestamp. RFC 3339, or a naive ISO 8601 time read as UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// One polled record for a single market.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketBook {
    /// Extract time (when the poll was taken), RFC 3339.
    #[serde(rename = "et", default)]
    pub extract_time: Option<String>,
    /// Official market start time, RFC 3339.
    #[serde(rename = "marketStartTime", default)]
    pub market_start_time: Option<String>,
    /// Market info: recorded files carry a one-element list, live calls an object.
    #[serde(rename = "marketInfo", default)]
    pub market_info: Option<MarketInfoPayload>,
}

impl MarketBook {
    /// The market info object, unwrapping the list form.
    #[must_use]
    pub fn info(&self) -> Option<&MarketInfo> {
        match self.market_info.as_ref()? {
            MarketInfoPayload::List(list) => list.first(),
            MarketInfoPayload::Single(info) => Some(info),
        }
    }
}

/// Market info arrives either as an object or as a list of objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarketInfoPayload {
    /// `[ {...} ]`
    List(Vec<MarketInfo>),
    /// `{...}`
    Single(MarketInfo),
}

/// Per-market book data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketInfo {
    /// Venue market id.
    #[serde(rename = "marketId", default)]
    pub market_id: Option<String>,
    /// Market status, e.g. `OPEN`, `SUSPENDED`, `CLOSED`.
    #[serde(default)]
    pub status: Option<String>,
    /// Whether the market has gone in-play.
    #[serde(default)]
    pub inplay: Option<bool>,
    /// Runner (outcome) records.
    #[serde(default)]
    pub runners: Option<Vec<RawRunner>>,
}

impl MarketInfo {
    /// Closed indicator reported by this payload, if any.
    ///
    /// `inplay = true` or a `CLOSED` status count as closed.
    #[must_use]
    pub fn closed_indicator(&self) -> Option<bool> {
        let closed_status = self.status.as_deref().map(|s| s == "CLOSED");
        match (self.inplay, closed_status) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), _) => Some(false),
            (None, _) => None,
        }
    }
}

/// One outcome as reported by the venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRunner {
    /// Selection id; records without one are discarded.
    #[serde(rename = "selectionId", default)]
    pub selection_id: Option<u64>,
    /// Removal timestamp, RFC 3339.
    #[serde(rename = "removalDate", default)]
    pub removal_date: Option<String>,
    /// Starting-price data.
    #[serde(default)]
    pub sp: Option<RawStartingPrice>,
    /// Exchange data.
    #[serde(default)]
    pub ex: Option<RawExchangePrices>,
}

/// Starting-price section of a runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStartingPrice {
    /// Projected SP; may be a number or a sentinel string such as `"Infinity"`.
    #[serde(rename = "nearPrice", default)]
    pub near_price: Option<serde_json::Value>,
    /// Back stake matched at SP.
    #[serde(rename = "backStakeTaken", default)]
    pub back_stake_taken: Option<Vec<RawPriceSize>>,
    /// Lay liability matched at SP.
    #[serde(rename = "layLiabilityTaken", default)]
    pub lay_liability_taken: Option<Vec<RawPriceSize>>,
}

/// Exchange section of a runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawExchangePrices {
    /// Best-first back ladder.
    #[serde(rename = "availableToBack", default)]
    pub available_to_back: Option<Vec<RawPriceSize>>,
    /// Best-first lay ladder.
    #[serde(rename = "availableToLay", default)]
    pub available_to_lay: Option<Vec<RawPriceSize>>,
    /// Traded volume by price.
    #[serde(rename = "tradedVolume", default)]
    pub traded_volume: Option<Vec<RawPriceSize>>,
}

/// A `(price, size)` ladder entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPriceSize {
    /// Decimal odds.
    pub price: f64,
    /// Stake (or liability, depending on the ladder).
    pub size: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_form_market_info() {
        let json = r#"{"et":"2024-03-02T14:59:55Z","marketStartTime":"2024-03-02T15:00:00Z",
            "marketInfo":[{"inplay":false,"runners":[{"selectionId":101,"sp":{"nearPrice":"Infinity"}}]}]}"#;
        let book: MarketBook = serde_json::from_str(json).unwrap();
        let info = book.info().unwrap();
        assert_eq!(info.inplay, Some(false));
        let runners = info.runners.as_ref().unwrap();
        assert_eq!(runners[0].selection_id, Some(101));
    }

    #[test]
    fn parses_object_form_market_info() {
        let json = r#"{"marketInfo":{"status":"OPEN","runners":[]}}"#;
        let book: MarketBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.info().unwrap().status.as_deref(), Some("OPEN"));
    }

    #[test]
    fn parses_timestamps_with_and_without_zone() {
        let zoned = parse_timestamp("2024-03-02T15:00:00.000Z").unwrap();
        let naive = parse_timestamp("2024-03-02T15:00:00").unwrap();
        assert_eq!(zoned, naive);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn closed_indicator_reads_inplay_and_status() {
        let mut info = MarketInfo::default();
        assert_eq!(info.closed_indicator(), None);
        info.inplay = Some(false);
        assert_eq!(info.closed_indicator(), Some(false));
        info.status = Some("CLOSED".into());
        assert_eq!(info.closed_indicator(), Some(true));
    }
}
