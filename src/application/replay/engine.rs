//! Rebuilding per-second market snapshots from a delta stream.
//!
//! The engine owns one mutable [`RunnerState`] per outcome. For every
//! record it first decides whether the record opens a new second; if so,
//! the state as it stood *before* the record is emitted for that second.
//! Only then are the record's deltas applied.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::gap_fill::GapFillExt;
use crate::domain::id::OutcomeId;
use crate::domain::ladder::{Ladder, RunnerState};
use crate::domain::stream::{
    DeltaChangeRecord, LevelDelta, MarketDefinition, ReconstructedSnapshot, RunnerChange,
};
use crate::port::outbound::history::HistoricalMarket;

/// Seconds before the start from which snapshots are emitted.
pub const PRE_START_WINDOW_SECONDS: i64 = 300;

/// Delta-stream replayer for one market.
#[derive(Debug, Clone)]
pub struct ReconstructionEngine {
    start_ms: i64,
    runners: BTreeMap<OutcomeId, RunnerState>,
    closed: bool,
    seen: BTreeSet<i64>,
}

impl ReconstructionEngine {
    /// Seed runner states from the market header.
    #[must_use]
    pub fn new(market: &HistoricalMarket) -> Self {
        let runners = market
            .runners
            .iter()
            .map(|definition| {
                let mut state = RunnerState::default();
                if let Some(date) = definition.removal_date {
                    state.mark_removed(date);
                }
                (definition.id, state)
            })
            .collect();
        Self {
            start_ms: market.start_time.timestamp_millis(),
            runners,
            closed: false,
            seen: BTreeSet::new(),
        }
    }

    /// Whether a closed indicator has been applied.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Current state of every outcome.
    #[must_use]
    pub const fn runners(&self) -> &BTreeMap<OutcomeId, RunnerState> {
        &self.runners
    }

    /// Process one record, returning this second's snapshot if the record
    /// opened a new second inside the emission window.
    pub fn process(&mut self, record: &DeltaChangeRecord) -> Option<ReconstructedSnapshot> {
        let elapsed = (record.process_time_ms - self.start_ms).div_euclid(1000);

        let emission = if elapsed >= -PRE_START_WINDOW_SECONDS && self.seen.insert(elapsed) {
            Some(ReconstructedSnapshot {
                elapsed_seconds: elapsed,
                closed: self.closed,
                runners: self.runners.clone(),
            })
        } else {
            None
        };

        for change in &record.runner_changes {
            self.apply_change(change);
        }
        if let Some(definition) = &record.definition {
            self.apply_definition(definition);
        }

        emission
    }

    fn apply_change(&mut self, change: &RunnerChange) {
        let Some(id) = change.id else {
            debug!("Runner change without id");
            return;
        };
        let state = self.runners.entry(id).or_default();
        apply_levels(&mut state.available_to_back, &change.available_to_back);
        apply_levels(&mut state.available_to_lay, &change.available_to_lay);
        apply_levels(&mut state.traded, &change.traded);
        apply_levels(&mut state.sp.back_stake_taken, &change.sp_back_taken);
        apply_levels(&mut state.sp.lay_liability_taken, &change.sp_lay_taken);
        if let Some(near) = change.sp_near_price {
            state.sp.near_price = Some(near);
        }
    }

    fn apply_definition(&mut self, definition: &MarketDefinition) {
        if definition.closed_indicator() == Some(true) {
            self.closed = true;
        }
        for runner in &definition.runners {
            let state = self.runners.entry(runner.id).or_default();
            if let Some(date) = runner.removal_date {
                state.mark_removed(date);
            }
        }
    }
}

fn apply_levels(ladder: &mut Ladder, deltas: &[LevelDelta]) {
    for (price, size) in deltas {
        ladder.apply(*price, *size);
    }
}

/// Replay `records` and gap-fill the emitted snapshots.
pub fn reconstruct<'a, I>(market: &HistoricalMarket, records: I) -> Vec<ReconstructedSnapshot>
where
    I: IntoIterator<Item = &'a DeltaChangeRecord>,
{
    let mut engine = ReconstructionEngine::new(market);
    records
        .into_iter()
        .filter_map(|record| engine.process(record))
        .gap_filled()
        .collect()
}
