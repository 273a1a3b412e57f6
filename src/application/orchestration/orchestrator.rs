//! The per-market control loop.

use tracing::{debug, info, warn};

use super::event::Event;
use super::state::{MarketState, TickOutcome, MAX_EMPTY_TICKS};
use crate::application::market::data::MarketData;
use crate::application::model::trend::TrendSignalModel;
use crate::application::risk::engine::RiskOrderEngine;
use crate::domain::id::MarketId;
use crate::domain::order::{ExecutionReport, Order};
use crate::domain::price::Commission;
use crate::domain::signal::CandidateSignal;
use crate::port::outbound::market::{MarketDataSource, RawSnapshot};
use crate::port::outbound::order::OrderSink;

/// Drives one market from first poll to a terminal state.
///
/// Owns its ledger, model and open-order set exclusively; nothing is shared
/// between markets. Exactly one tick runs at a time because [`tick`]
/// borrows the orchestrator mutably.
///
/// [`tick`]: Orchestrator::tick
pub struct Orchestrator<S, K> {
    market_id: MarketId,
    jurisdiction: Option<String>,
    source: S,
    sink: K,
    data: MarketData,
    model: TrendSignalModel,
    risk: RiskOrderEngine,
    state: MarketState,
    empty_ticks: u32,
}

impl<S, K> Orchestrator<S, K>
where
    S: MarketDataSource,
    K: OrderSink,
{
    /// Create a running orchestrator.
    pub fn new(
        market_id: MarketId,
        jurisdiction: Option<String>,
        source: S,
        sink: K,
        model: TrendSignalModel,
        risk: RiskOrderEngine,
        commission: Commission,
    ) -> Self {
        Self {
            market_id,
            jurisdiction,
            source,
            sink,
            data: MarketData::new(commission),
            model,
            risk,
            state: MarketState::Running,
            empty_ticks: 0,
        }
    }

    /// Market being traded.
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> MarketState {
        self.state
    }

    /// Consecutive ticks without usable data.
    pub const fn empty_ticks(&self) -> u32 {
        self.empty_ticks
    }

    /// Ledger and fixed probabilities.
    pub const fn data(&self) -> &MarketData {
        &self.data
    }

    /// Sizing engine and open orders.
    pub const fn risk(&self) -> &RiskOrderEngine {
        &self.risk
    }

    /// Run one tick. A terminal orchestrator returns at once without
    /// fetching.
    pub async fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::new(self.state);
        if self.state.is_terminal() {
            return outcome;
        }

        let raw = self.source.fetch(&self.market_id).await;
        let mut event = Event::MarketDataFetched(raw);
        loop {
            debug!(market_id = %self.market_id, event = event.name(), "Dispatching");
            event = match event {
                Event::MarketDataFetched(raw) => self.ingest(raw, &mut outcome),
                Event::DataIngested => self.run_model(&mut outcome),
                Event::SignalsProduced(signals) => self.size_orders(&signals),
                Event::OrdersSized(orders) => self.submit(orders).await,
                Event::OrdersSubmitted { orders, reports } => {
                    self.reconcile(&orders, &reports, &mut outcome)
                }
                Event::NothingToDo => break,
            };
        }

        outcome.state = self.state;
        outcome
    }

    fn ingest(&mut self, raw: Option<RawSnapshot>, outcome: &mut TickOutcome) -> Event {
        let usable = raw.as_ref().and_then(|raw| self.data.ingest(raw)).is_some();
        if !usable {
            self.empty_ticks += 1;
            debug!(
                market_id = %self.market_id,
                empty_ticks = self.empty_ticks,
                "No usable data this tick"
            );
            if self.empty_ticks >= MAX_EMPTY_TICKS {
                self.transition(MarketState::Exhausted);
            }
            return Event::NothingToDo;
        }

        self.empty_ticks = 0;
        outcome.usable = true;
        if self.data.is_closed() {
            self.transition(MarketState::Closed);
            return Event::NothingToDo;
        }
        Event::DataIngested
    }

    fn run_model(&mut self, outcome: &mut TickOutcome) -> Event {
        let Some(snapshot) = self.data.latest() else {
            return Event::NothingToDo;
        };
        let signals =
            self.model
                .signals(self.data.ledger(), snapshot, self.jurisdiction.as_deref());
        outcome.signals = signals.len();
        if signals.is_empty() {
            Event::NothingToDo
        } else {
            Event::SignalsProduced(signals)
        }
    }

    fn size_orders(&self, signals: &[CandidateSignal]) -> Event {
        let orders = self.risk.size_orders(signals);
        if orders.is_empty() {
            Event::NothingToDo
        } else {
            Event::OrdersSized(orders)
        }
    }

    async fn submit(&mut self, orders: Vec<Order>) -> Event {
        info!(
            market_id = %self.market_id,
            sink = self.sink.sink_name(),
            orders = orders.len(),
            "Submitting orders"
        );
        let reports = self.sink.submit(&self.market_id, &orders).await;
        Event::OrdersSubmitted { orders, reports }
    }

    fn reconcile(
        &mut self,
        orders: &[Order],
        reports: &[ExecutionReport],
        outcome: &mut TickOutcome,
    ) -> Event {
        let accepted = self.risk.reconcile(orders, reports);
        if accepted.len() < orders.len() {
            warn!(
                market_id = %self.market_id,
                submitted = orders.len(),
                accepted = accepted.len(),
                "Some orders were not executed"
            );
        }
        for order in &accepted {
            self.data.fix_probability(order.id(), order.probability());
        }
        outcome.executed = accepted;
        Event::NothingToDo
    }

    fn transition(&mut self, next: MarketState) {
        info!(
            market_id = %self.market_id,
            from = %self.state,
            to = %next,
            "Market state changed"
        );
        self.state = next;
    }
}
