//! Sizing across batches and open orders.

use laybook::application::risk::engine::{RiskOrderEngine, RiskSettings};
use laybook::application::risk::kelly::risk_fraction;
use laybook::domain::id::OutcomeId;
use laybook::domain::order::ExecutionReport;
use laybook::domain::signal::{CandidateSignal, ModelId, Side};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

fn candidate(id: u64, probability: f64, price: f64) -> CandidateSignal {
    CandidateSignal {
        id: OutcomeId::new(id),
        model_id: ModelId::HighLiquidityConsensus,
        side: Side::Buy,
        probability,
        reference_price: price,
        returns_price: price,
    }
}

fn uncapped() -> RiskSettings {
    RiskSettings {
        bankroll: dec!(1000),
        min_size: dec!(1),
        kelly_fraction: 1.0,
        max_fraction: 1.0,
    }
}

#[test]
fn batch_members_shrink_each_other() {
    let engine = RiskOrderEngine::new(uncapped());
    let a = candidate(1, 0.6, 2.0);
    let b = candidate(2, 0.4, 3.0);
    let orders = engine.size_orders(&[a.clone(), b.clone()]);
    assert_eq!(orders.len(), 2);

    let fa = risk_fraction(0.6, 2.0, 1.0, 1.0);
    let fb = risk_fraction(0.4, 3.0, 1.0, 1.0);
    assert!((orders[0].risk_fraction() - fa * (1.0 - fb)).abs() < 1e-12);
    assert!((orders[1].risk_fraction() - fb * (1.0 - fa)).abs() < 1e-12);

    let size = orders[0].size().to_f64().unwrap();
    assert!((size - 1000.0 * fa * (1.0 - fb)).abs() <= 0.005 + 1e-9);
}

#[test]
fn open_orders_shrink_later_batches_and_are_not_resized() {
    let mut engine = RiskOrderEngine::new(uncapped());
    let first = engine.size_orders(&[candidate(1, 0.6, 2.0)]);
    let reports: Vec<_> = first.iter().map(|o| ExecutionReport::success(o.id())).collect();
    let accepted = engine.reconcile(&first, &reports);
    assert_eq!(accepted.len(), 1);

    let open_fraction = first[0].risk_fraction();
    let second = engine.size_orders(&[candidate(1, 0.7, 2.0), candidate(2, 0.4, 3.0)]);
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id(), OutcomeId::new(2));
    let raw = risk_fraction(0.4, 3.0, 1.0, 1.0);
    assert!((second[0].risk_fraction() - raw * (1.0 - open_fraction)).abs() < 1e-12);
}

#[test]
fn failed_reports_leave_orders_closed() {
    let mut engine = RiskOrderEngine::new(uncapped());
    let orders = engine.size_orders(&[candidate(1, 0.6, 2.0), candidate(2, 0.4, 3.0)]);
    let reports = vec![
        ExecutionReport::success(OutcomeId::new(2)),
        ExecutionReport::failure(OutcomeId::new(1)),
    ];
    let accepted = engine.reconcile(&orders, &reports);
    assert_eq!(accepted.len(), 1);
    assert!(engine.is_open(OutcomeId::new(2)));
    assert!(!engine.is_open(OutcomeId::new(1)));
}

#[test]
fn stakes_below_the_venue_minimum_are_dropped() {
    let engine = RiskOrderEngine::new(RiskSettings {
        bankroll: dec!(100),
        min_size: dec!(5),
        kelly_fraction: 1.0,
        max_fraction: 0.05,
    });
    // 5% of 100 is exactly the minimum, which is not enough
    assert!(engine.size_orders(&[candidate(1, 0.6, 2.0)]).is_empty());
}
