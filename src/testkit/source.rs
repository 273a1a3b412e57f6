//! Test doubles for the market data and order ports.
//!
//! - [`ScriptedSource`] - Serves a fixed queue of ticks, then nothing.
//! - [`RecordingSink`] - Records every submission and fills all orders
//!   except those for rejected outcomes.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::id::{MarketId, OutcomeId};
use crate::domain::order::{ExecutionReport, Order};
use crate::port::outbound::market::{MarketDataSource, RawSnapshot};
use crate::port::outbound::order::OrderSink;

/// A market data source with a scripted tick queue.
///
/// Each `fetch` pops the next entry; an exhausted queue yields `None`.
pub struct ScriptedSource {
    ticks: VecDeque<Option<RawSnapshot>>,
    fetches: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(ticks: Vec<Option<RawSnapshot>>) -> Self {
        Self {
            ticks: ticks.into(),
            fetches: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A source that never has data.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Shared counter of `fetch` calls.
    pub fn fetch_count(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl MarketDataSource for ScriptedSource {
    async fn fetch(&mut self, _market_id: &MarketId) -> Option<RawSnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.ticks.pop_front().flatten()
    }
}

/// An order sink that records submissions.
#[derive(Default)]
pub struct RecordingSink {
    submitted: Arc<Mutex<Vec<Vec<Order>>>>,
    rejected: HashSet<OutcomeId>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every order for the given outcomes.
    pub fn rejecting(ids: impl IntoIterator<Item = OutcomeId>) -> Self {
        Self {
            rejected: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Shared log of submitted batches, in submission order.
    pub fn submissions(&self) -> Arc<Mutex<Vec<Vec<Order>>>> {
        Arc::clone(&self.submitted)
    }
}

#[async_trait]
impl OrderSink for RecordingSink {
    async fn submit(&mut self, _market_id: &MarketId, orders: &[Order]) -> Vec<ExecutionReport> {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(orders.to_vec());
        }
        orders
            .iter()
            .map(|order| {
                if self.rejected.contains(&order.id()) {
                    ExecutionReport::failure(order.id())
                } else {
                    ExecutionReport::success(order.id())
                }
            })
            .collect()
    }

    fn sink_name(&self) -> &'static str {
        "recording"
    }
}
