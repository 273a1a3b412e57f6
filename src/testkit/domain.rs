//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for ids and polled market books so
//! tests focus on assertions rather than construction boilerplate.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::domain::book::{
    MarketBook, MarketInfo, MarketInfoPayload, RawExchangePrices, RawPriceSize, RawRunner,
    RawStartingPrice,
};
use crate::domain::id::{MarketId, OutcomeId};
use crate::port::outbound::market::RawSnapshot;

/// Create a [`MarketId`] from a string.
pub fn market_id(id: &str) -> MarketId {
    MarketId::new(id)
}

/// Create an [`OutcomeId`].
pub const fn outcome(id: u64) -> OutcomeId {
    OutcomeId::new(id)
}

/// Official start time shared by test markets: 2024-03-02 15:00:00 UTC.
pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_709_391_600, 0).unwrap_or_default()
}

fn levels(levels: &[(f64, f64)]) -> Vec<RawPriceSize> {
    levels
        .iter()
        .map(|&(price, size)| RawPriceSize { price, size })
        .collect()
}

/// Fluent builder for a polled [`RawRunner`].
#[derive(Debug, Clone)]
pub struct RunnerBuilder {
    runner: RawRunner,
}

impl RunnerBuilder {
    /// A runner with the given selection id and nothing else.
    pub fn new(id: u64) -> Self {
        Self {
            runner: RawRunner {
                selection_id: Some(id),
                ..RawRunner::default()
            },
        }
    }

    pub fn near_price(mut self, price: f64) -> Self {
        self.sp().near_price = Some(serde_json::json!(price));
        self
    }

    pub fn sp_back_taken(mut self, taken: &[(f64, f64)]) -> Self {
        self.sp().back_stake_taken = Some(levels(taken));
        self
    }

    pub fn back(mut self, ladder: &[(f64, f64)]) -> Self {
        self.ex().available_to_back = Some(levels(ladder));
        self
    }

    pub fn lay(mut self, ladder: &[(f64, f64)]) -> Self {
        self.ex().available_to_lay = Some(levels(ladder));
        self
    }

    pub fn traded(mut self, volume: &[(f64, f64)]) -> Self {
        self.ex().traded_volume = Some(levels(volume));
        self
    }

    /// Mark the runner withdrawn at `at`.
    pub fn removed_at(mut self, at: DateTime<Utc>) -> Self {
        self.runner.removal_date = Some(at.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    pub fn build(self) -> RawRunner {
        self.runner
    }

    fn sp(&mut self) -> &mut RawStartingPrice {
        self.runner.sp.get_or_insert_with(RawStartingPrice::default)
    }

    fn ex(&mut self) -> &mut RawExchangePrices {
        self.runner.ex.get_or_insert_with(RawExchangePrices::default)
    }
}

/// A polled market book `elapsed_seconds` after [`start_time`].
pub fn book(elapsed_seconds: i64, inplay: bool, runners: Vec<RawRunner>) -> MarketBook {
    let start = start_time();
    let extract = start + Duration::seconds(elapsed_seconds);
    MarketBook {
        extract_time: Some(extract.to_rfc3339_opts(SecondsFormat::Secs, true)),
        market_start_time: Some(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        market_info: Some(MarketInfoPayload::Single(MarketInfo {
            market_id: None,
            status: Some("OPEN".into()),
            inplay: Some(inplay),
            runners: Some(runners),
        })),
    }
}

/// [`book`] wrapped as a live poll tick.
pub fn poll(elapsed_seconds: i64, inplay: bool, runners: Vec<RawRunner>) -> RawSnapshot {
    RawSnapshot::Poll(book(elapsed_seconds, inplay, runners))
}

/// Two runners where runner 1 holds most of the traded stake at an average
/// price well inside its offered back price: enough for a high-liquidity
/// consensus signal on runner 1 and nothing on runner 2.
pub fn consensus_runners() -> Vec<RawRunner> {
    vec![
        RunnerBuilder::new(1)
            .back(&[(2.5, 400.0), (2.48, 900.0)])
            .lay(&[(2.54, 300.0)])
            .traded(&[(2.2, 25_000.0)])
            .build(),
        RunnerBuilder::new(2)
            .back(&[(5.0, 150.0)])
            .lay(&[(5.2, 80.0)])
            .traded(&[(5.0, 5_000.0)])
            .build(),
    ]
}

/// Runners with thin books that never produce a signal.
pub fn quiet_runners() -> Vec<RawRunner> {
    vec![
        RunnerBuilder::new(1)
            .near_price(3.0)
            .back(&[(3.0, 20.0)])
            .traded(&[(3.0, 100.0)])
            .build(),
        RunnerBuilder::new(2)
            .near_price(1.6)
            .back(&[(1.6, 50.0)])
            .traded(&[(1.6, 200.0)])
            .build(),
    ]
}
