//! Per-market data state: the ledger plus fixed-probability bookkeeping.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::adapter::SnapshotAdapter;
use super::transform::{back_size_columns, snapshot_row};
use crate::domain::id::OutcomeId;
use crate::domain::ledger::{ColumnKey, MarketLedger, Variable};
use crate::domain::price::Commission;
use crate::domain::probability::CompositionalProbabilityEngine;
use crate::domain::snapshot::MarketSnapshot;
use crate::port::outbound::market::RawSnapshot;

/// Everything one market has observed so far.
#[derive(Debug, Clone)]
pub struct MarketData {
    adapter: SnapshotAdapter,
    engine: CompositionalProbabilityEngine,
    ledger: MarketLedger,
    fixed: BTreeMap<OutcomeId, f64>,
    latest: Option<MarketSnapshot>,
}

impl MarketData {
    /// Create empty market data. `commission` is removed from prices
    /// before normalization.
    #[must_use]
    pub fn new(commission: Commission) -> Self {
        Self {
            adapter: SnapshotAdapter::new(),
            engine: CompositionalProbabilityEngine::new(commission),
            ledger: MarketLedger::with_index(ColumnKey::market(Variable::ElapsedSeconds)),
            fixed: BTreeMap::new(),
            latest: None,
        }
    }

    /// Normalize `raw` and append it to the ledger.
    ///
    /// Returns the snapshot when the tick was usable, `None` otherwise.
    pub fn ingest(&mut self, raw: &RawSnapshot) -> Option<&MarketSnapshot> {
        let mut snapshot = self.adapter.adapt(raw)?;
        self.carry_removal_dates(&mut snapshot);

        let mut tick = MarketLedger::from_row(snapshot_row(&snapshot, &self.engine, &self.fixed));
        tick.sum_columns(
            ColumnKey::market(Variable::MarketBackSize),
            &back_size_columns(&snapshot),
        );
        if let Err(err) = self.ledger.add_rows(&tick) {
            warn!(error = %err, "Dropping snapshot that could not be indexed");
            return None;
        }

        debug!(
            elapsed_seconds = snapshot.elapsed_seconds,
            outcomes = snapshot.outcomes.len(),
            closed = snapshot.closed,
            "Snapshot ingested"
        );
        self.latest = Some(snapshot);
        self.latest.as_ref()
    }

    /// Whether the ledger's closed indicator reads true.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        let closed = ColumnKey::market(Variable::ClosedIndicator);
        self.ledger.has_column(closed) && self.ledger.last_entry(closed) >= 1.0
    }

    /// Fix `id`'s probability for the rest of the market.
    pub fn fix_probability(&mut self, id: OutcomeId, probability: f64) {
        self.fixed.insert(id, probability);
    }

    /// Outcomes whose probability has been fixed.
    #[must_use]
    pub const fn fixed_probabilities(&self) -> &BTreeMap<OutcomeId, f64> {
        &self.fixed
    }

    /// The ledger.
    #[must_use]
    pub const fn ledger(&self) -> &MarketLedger {
        &self.ledger
    }

    /// The most recent usable snapshot.
    #[must_use]
    pub const fn latest(&self) -> Option<&MarketSnapshot> {
        self.latest.as_ref()
    }

    /// Removal dates are final: a tick that omits one keeps the recorded date.
    fn carry_removal_dates(&mut self, snapshot: &mut MarketSnapshot) {
        for record in &mut snapshot.outcomes {
            if record.removal_date.is_some() {
                continue;
            }
            let column = ColumnKey::outcome(Variable::RemovalDate, record.id);
            let recorded = self.ledger.last_entry(column);
            if recorded.is_finite() {
                record.removal_date = Some(recorded as i64);
                self.ledger.forward_fill(column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(et: &str, info: &str) -> RawSnapshot {
        RawSnapshot::Poll(
            serde_json::from_str(&format!(
                r#"{{"et":"{et}","marketStartTime":"2024-03-02T15:00:00Z","marketInfo":[{info}]}}"#
            ))
            .unwrap(),
        )
    }

    const RUNNERS: &str = r#""runners":[
        {"selectionId":1,"sp":{"nearPrice":2.1},"ex":{"tradedVolume":[{"price":2.1,"size":500.0}]}},
        {"selectionId":2,"sp":{"nearPrice":2.1},"ex":{"tradedVolume":[{"price":2.1,"size":1500.0}]}}]"#;

    #[test]
    fn ingest_appends_one_row_per_second() {
        let mut data = MarketData::new(Commission::default());
        let info = format!(r#"{{"inplay":false,{RUNNERS}}}"#);
        assert!(data.ingest(&poll("2024-03-02T14:59:00Z", &info)).is_some());
        assert!(data.ingest(&poll("2024-03-02T14:59:00Z", &info)).is_some());
        assert!(data.ingest(&poll("2024-03-02T14:59:01Z", &info)).is_some());

        assert_eq!(data.ledger().index(), vec![-60, -59]);
        assert!(!data.is_closed());
        let p = data.ledger().last_entry(ColumnKey::outcome(
            Variable::CompositionalSpProbability,
            OutcomeId::new(1),
        ));
        assert!((p - 0.5).abs() < 1e-12);
        let market = data
            .ledger()
            .last_entry(ColumnKey::market(Variable::MarketBackSize));
        assert_eq!(market, 2000.0);
    }

    #[test]
    fn closed_indicator_is_read_from_ledger() {
        let mut data = MarketData::new(Commission::default());
        data.ingest(&poll(
            "2024-03-02T15:00:02Z",
            &format!(r#"{{"inplay":true,{RUNNERS}}}"#),
        ));
        assert!(data.is_closed());
    }

    #[test]
    fn unusable_tick_leaves_ledger_untouched() {
        let mut data = MarketData::new(Commission::default());
        assert!(data.ingest(&poll("bad", r#"{"runners":[]}"#)).is_none());
        assert!(data.ledger().is_empty());
        assert!(data.latest().is_none());
    }

    #[test]
    fn removal_date_survives_a_tick_that_omits_it() {
        let mut data = MarketData::new(Commission::default());
        data.ingest(&poll(
            "2024-03-02T14:59:00Z",
            r#"{"runners":[{"selectionId":1,"removalDate":"2024-03-02T14:00:00Z"},{"selectionId":2}]}"#,
        ));
        let snapshot = data
            .ingest(&poll(
                "2024-03-02T14:59:01Z",
                r#"{"runners":[{"selectionId":1},{"selectionId":2}]}"#,
            ))
            .unwrap();
        assert_eq!(
            snapshot.outcome(OutcomeId::new(1)).unwrap().removal_date,
            Some(1_709_388_000)
        );
    }

    #[test]
    fn fixed_probability_changes_later_targets() {
        let mut data = MarketData::new(Commission::default());
        data.fix_probability(OutcomeId::new(1), 0.3);
        data.ingest(&poll("2024-03-02T14:59:00Z", &format!(r#"{{{RUNNERS}}}"#)));
        let p2 = data.ledger().last_entry(ColumnKey::outcome(
            Variable::CompositionalSpProbability,
            OutcomeId::new(2),
        ));
        assert!((p2 - 0.7).abs() < 1e-12);
    }
}
