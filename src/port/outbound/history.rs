//! Historical stream log port.

use chrono::{DateTime, Utc};

use crate::domain::id::{MarketId, OutcomeId};
use crate::domain::stream::{DeltaChangeRecord, RunnerDefinition};

/// Header of a recorded market.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalMarket {
    /// Market id.
    pub market_id: MarketId,
    /// Market type, e.g. `WIN`.
    pub market_type: String,
    /// Official start time.
    pub start_time: DateTime<Utc>,
    /// Venue country code, when recorded.
    pub country_code: Option<String>,
    /// Runner definitions from the first market definition.
    pub runners: Vec<RunnerDefinition>,
    /// Recorded winner, when the log includes settlement.
    pub winner: Option<OutcomeId>,
}

/// A forward-only sequence of recorded delta records for one market.
pub trait HistoricalLogSource {
    /// Market header.
    fn market(&self) -> &HistoricalMarket;

    /// Next record, or `None` when the log is exhausted.
    fn next_record(&mut self) -> Option<DeltaChangeRecord>;
}

/// Drain `source` into a list.
pub fn materialize<S: HistoricalLogSource + ?Sized>(source: &mut S) -> Vec<DeltaChangeRecord> {
    std::iter::from_fn(|| source.next_record()).collect()
}
