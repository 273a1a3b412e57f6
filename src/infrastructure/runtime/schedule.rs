//! Market discovery and per-market task management.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use super::market::run_market;
use crate::adapter::outbound::exchange::settings::ExchangeConfig;
use crate::adapter::outbound::exchange::{VenueClient, VenueMarketSource, VenueOrderSink};
use crate::adapter::outbound::paper::PaperOrderSink;
use crate::application::model::trend::{ModelSettings, TrendSignalModel};
use crate::application::orchestration::orchestrator::Orchestrator;
use crate::application::orchestration::state::MarketState;
use crate::application::risk::engine::{RiskOrderEngine, RiskSettings};
use crate::domain::id::MarketId;
use crate::domain::price::Commission;
use crate::port::outbound::schedule::{MarketDescriptor, ScheduleSource};

/// A running market's future, resolving to its final state.
pub type MarketTask = Pin<Box<dyn Future<Output = MarketState> + Send + 'static>>;

/// Builds the task that trades one discovered market.
pub trait MarketLauncher: Send + Sync {
    fn launch(&self, market: &MarketDescriptor, shutdown: watch::Receiver<bool>) -> MarketTask;
}

/// Discovery settings for [`run_schedule`].
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    /// Venue event type to list markets for.
    pub event_type_id: String,
    /// Markets starting within this window are launched.
    pub lookahead: chrono::Duration,
    /// Delay between schedule refreshes.
    pub refresh: Duration,
    /// Upper bound on markets running at once.
    pub max_concurrent_markets: usize,
}

impl From<&ExchangeConfig> for ScheduleSettings {
    fn from(config: &ExchangeConfig) -> Self {
        Self {
            event_type_id: config.event_type_id.clone(),
            lookahead: chrono::Duration::minutes(config.lookahead_minutes),
            refresh: Duration::from_secs(config.schedule_interval_secs),
            max_concurrent_markets: config.max_concurrent_markets,
        }
    }
}

/// Refresh the schedule periodically and launch one task per upcoming
/// market, never more than `max_concurrent_markets` at once. A market is
/// launched at most once per run, even after its task has finished.
/// Schedule failures are logged and retried on the next refresh.
///
/// Returns the number of markets launched once `shutdown` flips to true
/// and every running market has stopped.
pub async fn run_schedule<S, L>(
    schedule: &S,
    launcher: &L,
    settings: &ScheduleSettings,
    mut shutdown: watch::Receiver<bool>,
) -> usize
where
    S: ScheduleSource + ?Sized,
    L: MarketLauncher + ?Sized,
{
    let mut tasks: JoinSet<(MarketId, MarketState)> = JoinSet::new();
    let mut running: HashSet<MarketId> = HashSet::new();
    let mut seen: HashSet<MarketId> = HashSet::new();
    let mut refresh = interval(settings.refresh);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                let before = Utc::now() + settings.lookahead;
                let upcoming = match schedule.list_upcoming(&settings.event_type_id, before).await {
                    Ok(upcoming) => upcoming,
                    Err(err) => {
                        warn!(error = %err, "Schedule refresh failed");
                        continue;
                    }
                };
                for market in upcoming {
                    if running.len() >= settings.max_concurrent_markets {
                        break;
                    }
                    if !seen.insert(market.id.clone()) {
                        continue;
                    }
                    running.insert(market.id.clone());
                    info!(
                        market_id = %market.id,
                        start_time = %market.start_time,
                        country = market.country_code.as_deref().unwrap_or("-"),
                        "Launching market"
                    );
                    let task = launcher.launch(&market, shutdown.clone());
                    let id = market.id;
                    tasks.spawn(async move { (id, task.await) });
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                match joined {
                    Ok((id, state)) => {
                        info!(market_id = %id, state = %state, "Market task finished");
                        running.remove(&id);
                    }
                    Err(err) => warn!(error = %err, "Market task failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!(running = tasks.len(), "Waiting for running markets to stop");
    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            warn!(error = %err, "Market task failed");
        }
    }
    seen.len()
}

/// Launches live markets against the venue, or against the paper sink in
/// dry-run mode.
pub struct VenueLauncher {
    client: Arc<VenueClient>,
    model: ModelSettings,
    risk: RiskSettings,
    commission: Commission,
    poll_interval: Duration,
    dry_run: bool,
}

impl VenueLauncher {
    /// Launcher sharing one logged-in `client` across markets.
    #[must_use]
    pub fn new(
        client: Arc<VenueClient>,
        model: ModelSettings,
        risk: RiskSettings,
        commission: Commission,
        poll_interval: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            client,
            model,
            risk,
            commission,
            poll_interval,
            dry_run,
        }
    }
}

impl MarketLauncher for VenueLauncher {
    fn launch(&self, market: &MarketDescriptor, shutdown: watch::Receiver<bool>) -> MarketTask {
        let source = VenueMarketSource::new(Arc::clone(&self.client), market.start_time);
        let model = TrendSignalModel::new(self.model.clone(), self.commission);
        let risk = RiskOrderEngine::new(self.risk.clone());
        let id = market.id.clone();
        let jurisdiction = market.country_code.clone();
        let commission = self.commission;
        let poll_interval = self.poll_interval;

        if self.dry_run {
            let sink = PaperOrderSink::new();
            Box::pin(async move {
                let mut orchestrator =
                    Orchestrator::new(id, jurisdiction, source, sink, model, risk, commission);
                run_market(&mut orchestrator, poll_interval, shutdown).await
            })
        } else {
            let sink = VenueOrderSink::new(Arc::clone(&self.client));
            Box::pin(async move {
                let mut orchestrator =
                    Orchestrator::new(id, jurisdiction, source, sink, model, risk, commission);
                run_market(&mut orchestrator, poll_interval, shutdown).await
            })
        }
    }
}
