//! Incremental market change records from a historical stream log.
//!
//! A [`DeltaChangeRecord`] is a sparse, timestamped update: a few ladder
//! levels for a few outcomes, perhaps a starting-price revision, perhaps a
//! market-definition change. Replaying them in order rebuilds the full
//! market state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::id::{MarketId, OutcomeId};
use super::ladder::RunnerState;

/// One `(price, size)` ladder delta. A size of zero removes the level.
pub type LevelDelta = (f64, f64);

/// Changes to a single outcome carried by one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerChange {
    /// Outcome the change applies to.
    pub id: Option<OutcomeId>,
    /// Available-to-back deltas.
    pub available_to_back: Vec<LevelDelta>,
    /// Available-to-lay deltas.
    pub available_to_lay: Vec<LevelDelta>,
    /// Traded-volume deltas.
    pub traded: Vec<LevelDelta>,
    /// SP back-stake-taken deltas.
    pub sp_back_taken: Vec<LevelDelta>,
    /// SP lay-liability-taken deltas.
    pub sp_lay_taken: Vec<LevelDelta>,
    /// New SP near price.
    pub sp_near_price: Option<f64>,
}

/// Status of a runner within a market definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerStatus {
    /// Still running.
    Active,
    /// Withdrawn.
    Removed,
    /// Won the market.
    Winner,
    /// Lost the market.
    Loser,
    /// Anything else the venue reports.
    Other,
}

impl RunnerStatus {
    /// Parse the venue's status string.
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status {
            "ACTIVE" => Self::Active,
            "REMOVED" => Self::Removed,
            "WINNER" => Self::Winner,
            "LOSER" => Self::Loser,
            _ => Self::Other,
        }
    }
}

/// Runner entry of a market definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerDefinition {
    /// Outcome id.
    pub id: OutcomeId,
    /// Runner status.
    pub status: RunnerStatus,
    /// Epoch seconds of withdrawal.
    pub removal_date: Option<i64>,
}

/// Market definition snapshot carried by a record.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDefinition {
    /// Market type, e.g. `WIN`.
    pub market_type: Option<String>,
    /// Official start time.
    pub market_time: Option<DateTime<Utc>>,
    /// Whether the market is in play.
    pub in_play: Option<bool>,
    /// Market status, e.g. `OPEN`, `CLOSED`.
    pub status: Option<String>,
    /// Venue country code, e.g. `GB`.
    pub country_code: Option<String>,
    /// Runner entries.
    pub runners: Vec<RunnerDefinition>,
}

impl MarketDefinition {
    /// Closed indicator carried by the definition, if any.
    #[must_use]
    pub fn closed_indicator(&self) -> Option<bool> {
        if self.status.as_deref() == Some("CLOSED") {
            return Some(true);
        }
        self.in_play
    }

    /// Id of the winning runner, if the market has been settled.
    #[must_use]
    pub fn winner(&self) -> Option<OutcomeId> {
        self.runners
            .iter()
            .find(|r| r.status == RunnerStatus::Winner)
            .map(|r| r.id)
    }
}

/// A timestamped partial update to one market.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaChangeRecord {
    /// Publish time in epoch milliseconds.
    pub process_time_ms: i64,
    /// Market the record belongs to.
    pub market_id: Option<MarketId>,
    /// Market definition change, when present.
    pub definition: Option<MarketDefinition>,
    /// Per-outcome changes.
    pub runner_changes: Vec<RunnerChange>,
}

impl DeltaChangeRecord {
    /// Create a record with no changes.
    #[must_use]
    pub fn new(process_time_ms: i64) -> Self {
        Self {
            process_time_ms,
            market_id: None,
            definition: None,
            runner_changes: Vec::new(),
        }
    }
}

/// Full per-outcome state of a market at one elapsed second, as emitted by
/// the reconstruction engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructedSnapshot {
    /// Seconds since the official start time.
    pub elapsed_seconds: i64,
    /// Sticky closed flag.
    pub closed: bool,
    /// Deep copy of every outcome's state.
    pub runners: BTreeMap<OutcomeId, RunnerState>,
}

impl ReconstructedSnapshot {
    /// Copy of this snapshot stamped with a different elapsed second.
    #[must_use]
    pub fn at(&self, elapsed_seconds: i64) -> Self {
        Self {
            elapsed_seconds,
            ..self.clone()
        }
    }
}
