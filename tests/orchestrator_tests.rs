//! Orchestrator lifecycle and the full poll → order pipeline.

mod support;

use std::sync::atomic::Ordering;

use laybook::application::model::trend::{ModelSettings, TrendSignalModel};
use laybook::application::orchestration::orchestrator::Orchestrator;
use laybook::application::orchestration::state::{MarketState, MAX_EMPTY_TICKS};
use laybook::application::risk::engine::{RiskOrderEngine, RiskSettings};
use laybook::domain::price::Commission;
use laybook::domain::signal::Side;
use laybook::testkit::domain::{consensus_runners, market_id, outcome, poll, quiet_runners};
use laybook::testkit::source::{RecordingSink, ScriptedSource};
use rust_decimal_macros::dec;

use support::assertions::{assert_close, assert_decimal_near};

fn orchestrator(source: ScriptedSource, sink: RecordingSink) -> Orchestrator<ScriptedSource, RecordingSink> {
    let commission = Commission::default();
    Orchestrator::new(
        market_id("1.2345"),
        Some("GB".into()),
        source,
        sink,
        TrendSignalModel::new(ModelSettings::default(), commission),
        RiskOrderEngine::new(RiskSettings::default()),
        commission,
    )
}

#[tokio::test]
async fn ten_empty_fetches_exhaust_the_market() {
    let source = ScriptedSource::empty();
    let fetches = source.fetch_count();
    let mut orchestrator = orchestrator(source, RecordingSink::new());

    for tick in 1..MAX_EMPTY_TICKS {
        let outcome = orchestrator.tick().await;
        assert_eq!(outcome.state, MarketState::Running, "tick {tick}");
        assert!(!outcome.usable);
        assert_eq!(orchestrator.empty_ticks(), tick);
    }

    let outcome = orchestrator.tick().await;
    assert_eq!(outcome.state, MarketState::Exhausted);
    assert_eq!(fetches.load(Ordering::SeqCst), MAX_EMPTY_TICKS);

    // terminal: no further fetch
    let outcome = orchestrator.tick().await;
    assert_eq!(outcome.state, MarketState::Exhausted);
    assert_eq!(fetches.load(Ordering::SeqCst), MAX_EMPTY_TICKS);
}

#[tokio::test]
async fn usable_tick_resets_the_empty_counter() {
    let mut ticks = vec![None; 9];
    ticks.push(Some(poll(-200, false, quiet_runners())));
    ticks.extend(vec![None; 9]);
    let mut orchestrator = orchestrator(ScriptedSource::new(ticks), RecordingSink::new());

    for _ in 0..9 {
        orchestrator.tick().await;
    }
    assert_eq!(orchestrator.empty_ticks(), 9);

    let outcome = orchestrator.tick().await;
    assert!(outcome.usable);
    assert_eq!(outcome.signals, 0);
    assert_eq!(orchestrator.empty_ticks(), 0);

    for _ in 0..9 {
        orchestrator.tick().await;
    }
    assert_eq!(orchestrator.state(), MarketState::Running);
    assert_eq!(orchestrator.tick().await.state, MarketState::Exhausted);
}

#[tokio::test]
async fn in_play_poll_closes_the_market_without_trading() {
    let sink = RecordingSink::new();
    let submissions = sink.submissions();
    let mut orchestrator = orchestrator(
        ScriptedSource::new(vec![Some(poll(3, true, consensus_runners()))]),
        sink,
    );

    let outcome = orchestrator.tick().await;
    assert_eq!(outcome.state, MarketState::Closed);
    assert!(outcome.usable);
    assert!(outcome.executed.is_empty());
    assert!(submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn consensus_signal_is_sized_submitted_and_fixed() {
    let sink = RecordingSink::new();
    let submissions = sink.submissions();
    let mut orchestrator = orchestrator(
        ScriptedSource::new(vec![
            Some(poll(-120, false, consensus_runners())),
            Some(poll(-119, false, consensus_runners())),
            Some(poll(2, true, consensus_runners())),
        ]),
        sink,
    );

    let first = orchestrator.tick().await;
    assert_eq!(first.state, MarketState::Running);
    assert_eq!(first.signals, 1);
    assert_eq!(first.executed.len(), 1);

    let order = &first.executed[0];
    assert_eq!(order.id(), outcome(1));
    assert_eq!(order.side(), Side::Buy);
    assert_eq!(order.reference_price(), 2.5);
    // capped at 5% of a 5,000 bankroll
    assert_decimal_near(order.size(), dec!(250), dec!(0.01));
    assert!(orchestrator.risk().is_open(outcome(1)));

    // normalized exchange probability of runner 1 is now fixed
    let fixed = orchestrator.data().fixed_probabilities()[&outcome(1)];
    assert_close(fixed, 0.4672897 / (0.4672897 + 0.2083333), 1e-6);

    // runner 1 is open, runner 2 lacks market share
    let second = orchestrator.tick().await;
    assert!(second.executed.is_empty());

    let third = orchestrator.tick().await;
    assert_eq!(third.state, MarketState::Closed);
    assert_eq!(submissions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_orders_stay_closed_and_are_retried() {
    let sink = RecordingSink::rejecting([outcome(1)]);
    let submissions = sink.submissions();
    let mut orchestrator = orchestrator(
        ScriptedSource::new(vec![
            Some(poll(-120, false, consensus_runners())),
            Some(poll(-119, false, consensus_runners())),
        ]),
        sink,
    );

    let first = orchestrator.tick().await;
    assert_eq!(first.signals, 1);
    assert!(first.executed.is_empty());
    assert!(!orchestrator.risk().is_open(outcome(1)));
    assert!(orchestrator.data().fixed_probabilities().is_empty());

    orchestrator.tick().await;
    assert_eq!(submissions.lock().unwrap().len(), 2);
}
