//! Offline replay of a recorded market.

use serde::Serialize;
use tracing::info;

use crate::adapter::outbound::paper::{PaperOrderSink, ReplaySource};
use crate::application::model::trend::{ModelSettings, TrendSignalModel};
use crate::application::orchestration::orchestrator::Orchestrator;
use crate::application::orchestration::state::MarketState;
use crate::application::replay::reconstruct;
use crate::application::risk::engine::{RiskOrderEngine, RiskSettings};
use crate::domain::id::{MarketId, OutcomeId};
use crate::domain::order::Order;
use crate::domain::price::Commission;
use crate::port::outbound::history::{materialize, HistoricalLogSource};

/// Result of replaying one market.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    /// Market the log records.
    pub market_id: MarketId,
    /// Delta records read from the log.
    pub records: usize,
    /// Gap-filled snapshots served to the orchestrator.
    pub snapshots: usize,
    /// Ticks run, including the one that reached the final state.
    pub ticks: usize,
    /// Signals produced across all ticks.
    pub signals: usize,
    /// Orders filled by the paper sink, in fill order.
    pub orders: Vec<Order>,
    /// Terminal state the orchestrator stopped in.
    pub final_state: MarketState,
    /// Recorded winner, when the log includes settlement.
    pub winner: Option<OutcomeId>,
}

impl ReplaySummary {
    /// Orders placed on the recorded winner.
    #[must_use]
    pub fn winning_orders(&self) -> usize {
        self.winner.map_or(0, |winner| {
            self.orders.iter().filter(|o| o.id() == winner).count()
        })
    }
}

/// Replay `log` through a fresh orchestrator with a paper sink.
///
/// Ticks run back to back until the orchestrator is terminal: either the
/// replay reaches the closing snapshot, or the source runs dry and ten
/// empty fetches exhaust the market.
pub async fn run_replay<L>(
    log: &mut L,
    model: ModelSettings,
    risk: RiskSettings,
    commission: Commission,
) -> ReplaySummary
where
    L: HistoricalLogSource + ?Sized,
{
    let market = log.market().clone();
    let records = materialize(log);
    let snapshots = reconstruct(&market, &records);
    info!(
        market_id = %market.market_id,
        records = records.len(),
        snapshots = snapshots.len(),
        "Replaying market"
    );

    let snapshot_count = snapshots.len();
    let mut orchestrator = Orchestrator::new(
        market.market_id.clone(),
        market.country_code.clone(),
        ReplaySource::new(snapshots),
        PaperOrderSink::new(),
        TrendSignalModel::new(model, commission),
        RiskOrderEngine::new(risk),
        commission,
    );

    let mut ticks = 0;
    let mut signals = 0;
    let mut orders = Vec::new();
    while !orchestrator.state().is_terminal() {
        let outcome = orchestrator.tick().await;
        ticks += 1;
        signals += outcome.signals;
        orders.extend(outcome.executed);
    }

    let summary = ReplaySummary {
        market_id: market.market_id,
        records: records.len(),
        snapshots: snapshot_count,
        ticks,
        signals,
        orders,
        final_state: orchestrator.state(),
        winner: market.winner,
    };
    info!(
        market_id = %summary.market_id,
        ticks = summary.ticks,
        orders = summary.orders.len(),
        state = %summary.final_state,
        "Replay finished"
    );
    summary
}
