//! Snapshot → ledger row.

use std::collections::BTreeMap;

use crate::domain::id::OutcomeId;
use crate::domain::ledger::{ColumnKey, Row, Variable};
use crate::domain::price::price_of;
use crate::domain::probability::{CompositionalProbability, CompositionalProbabilityEngine};
use crate::domain::snapshot::MarketSnapshot;

/// Flatten `snapshot` into one ledger row, computing both compositional
/// probability sets.
///
/// Outcomes in `fixed` are left out of normalization and the remaining
/// outcomes are scaled to `1 - Σ fixed`; the fixed outcomes' compositional
/// columns carry their fixed probability.
#[must_use]
pub fn snapshot_row(
    snapshot: &MarketSnapshot,
    engine: &CompositionalProbabilityEngine,
    fixed: &BTreeMap<OutcomeId, f64>,
) -> Row {
    let mut row = Row::new();
    row.insert(
        ColumnKey::market(Variable::ElapsedSeconds),
        snapshot.elapsed_seconds as f64,
    );
    row.insert(
        ColumnKey::market(Variable::ClosedIndicator),
        if snapshot.closed { 1.0 } else { 0.0 },
    );

    for record in &snapshot.outcomes {
        let id = record.id;
        let mut put = |variable, value| {
            row.insert(ColumnKey::outcome(variable, id), value);
        };
        put(
            Variable::RemovalDate,
            record.removal_date.map_or(f64::NAN, |d| d as f64),
        );
        put(Variable::SpBackPrice, record.sp_back_price);
        put(Variable::SpBackSize, record.sp_back_size);
        put(Variable::SpLayPrice, record.sp_lay_price);
        put(Variable::SpLaySize, record.sp_lay_size);
        put(Variable::ExAverageBackPrice, record.ex_average_back_price);
        put(Variable::ExBackSize, record.ex_back_size);
        put(Variable::ExAverageLayPrice, record.ex_average_lay_price);
        put(Variable::ExLaySize, record.ex_lay_size);
        put(Variable::ExOfferedBackPrice, record.ex_offered_back_price);
        put(Variable::ExOfferedLayPrice, record.ex_offered_lay_price);
        put(Variable::CombinedBackSize, record.combined_back_size());
    }

    let target = 1.0 - fixed.values().sum::<f64>();
    let open: Vec<_> = snapshot
        .outcomes
        .iter()
        .filter(|r| !fixed.contains_key(&r.id))
        .collect();

    let sp_items: Vec<_> = open.iter().map(|r| (r.id, r.sp_back_price)).collect();
    let ex_items: Vec<_> = open
        .iter()
        .map(|r| (r.id, r.ex_average_back_price))
        .collect();

    insert_compositional(
        &mut row,
        &engine.compose(&sp_items, target),
        Variable::CompositionalSpProbability,
        Variable::CompositionalSpBackPrice,
    );
    insert_compositional(
        &mut row,
        &engine.compose(&ex_items, target),
        Variable::CompositionalExAverageProbability,
        Variable::CompositionalExAverageBackPrice,
    );

    for (id, probability) in fixed {
        if snapshot.outcome(*id).is_none() {
            continue;
        }
        for (p_var, price_var) in [
            (
                Variable::CompositionalSpProbability,
                Variable::CompositionalSpBackPrice,
            ),
            (
                Variable::CompositionalExAverageProbability,
                Variable::CompositionalExAverageBackPrice,
            ),
        ] {
            row.insert(ColumnKey::outcome(p_var, *id), *probability);
            row.insert(ColumnKey::outcome(price_var, *id), price_of(*probability));
        }
    }

    row
}

/// Columns summed into the market back size.
#[must_use]
pub fn back_size_columns(snapshot: &MarketSnapshot) -> Vec<ColumnKey> {
    snapshot
        .outcomes
        .iter()
        .map(|r| ColumnKey::outcome(Variable::CombinedBackSize, r.id))
        .collect()
}

fn insert_compositional(
    row: &mut Row,
    items: &[CompositionalProbability],
    probability: Variable,
    price: Variable,
) {
    for item in items {
        row.insert(ColumnKey::outcome(probability, item.id), item.probability);
        row.insert(ColumnKey::outcome(price, item.id), item.implied_price);
    }
}
