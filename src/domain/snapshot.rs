//! Point-in-time market snapshots.

use super::id::OutcomeId;
use super::outcome::OutcomeRecord;

/// A market's normalized state at one elapsed second.
///
/// `elapsed_seconds` is relative to the official start time (negative
/// before the start). Within one market the sequence of elapsed times is
/// strictly increasing and `closed` never goes from true back to false.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    /// Seconds since the official start time.
    pub elapsed_seconds: i64,
    /// Whether the market has closed (gone in-play or been settled).
    pub closed: bool,
    /// Normalized outcome records.
    pub outcomes: Vec<OutcomeRecord>,
}

impl MarketSnapshot {
    /// Create a new snapshot.
    #[must_use]
    pub fn new(elapsed_seconds: i64, closed: bool, outcomes: Vec<OutcomeRecord>) -> Self {
        Self {
            elapsed_seconds,
            closed,
            outcomes,
        }
    }

    /// Look up an outcome by id.
    #[must_use]
    pub fn outcome(&self, id: OutcomeId) -> Option<&OutcomeRecord> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// Ids of every outcome in the snapshot.
    #[must_use]
    pub fn outcome_ids(&self) -> Vec<OutcomeId> {
        self.outcomes.iter().map(|o| o.id).collect()
    }
}
