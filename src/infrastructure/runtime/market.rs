//! Polling loop for one market.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::application::orchestration::orchestrator::Orchestrator;
use crate::application::orchestration::state::MarketState;
use crate::port::outbound::market::MarketDataSource;
use crate::port::outbound::order::OrderSink;

/// Tick `orchestrator` every `poll_interval` until it reaches a terminal
/// state or `shutdown` flips to true. Returns the final state.
pub async fn run_market<S, K>(
    orchestrator: &mut Orchestrator<S, K>,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> MarketState
where
    S: MarketDataSource,
    K: OrderSink,
{
    info!(market_id = %orchestrator.market_id(), "Market started");
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!(market_id = %orchestrator.market_id(), "Market stopped by shutdown");
                    break;
                }
                continue;
            }
        }

        let outcome = orchestrator.tick().await;
        debug!(
            market_id = %orchestrator.market_id(),
            state = %outcome.state,
            usable = outcome.usable,
            signals = outcome.signals,
            executed = outcome.executed.len(),
            "Tick complete"
        );
        if outcome.state.is_terminal() {
            break;
        }
    }

    info!(
        market_id = %orchestrator.market_id(),
        state = %orchestrator.state(),
        open_orders = orchestrator.risk().open_orders().len(),
        "Market finished"
    );
    orchestrator.state()
}
