//! Handler for the `run` command.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::exchange::{Credentials, VenueClient};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::runtime::{run_schedule, ScheduleSettings, VenueLauncher};

/// Execute the run command. Returns once `shutdown` flips and every
/// running market has stopped.
pub async fn execute(config: &Config, args: &RunArgs, shutdown: watch::Receiver<bool>) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let client = Arc::new(VenueClient::login(&config.exchange, &credentials).await?);

    let dry_run = config.dry_run || args.dry_run;
    let mut schedule = ScheduleSettings::from(&config.exchange);
    if let Some(max) = args.max_markets {
        schedule.max_concurrent_markets = max.max(1);
    }
    let launcher = VenueLauncher::new(
        Arc::clone(&client),
        config.model_settings(),
        config.risk_settings(),
        config.commission(),
        Duration::from_millis(config.exchange.poll_interval_ms),
        dry_run,
    );

    output::section("Running");
    output::field("Mode", if dry_run { "dry run" } else { "live" });
    output::field("Countries", config.exchange.countries.join(","));
    output::field("Max markets", schedule.max_concurrent_markets);
    info!(dry_run, "laybook running");

    let launched = run_schedule(client.as_ref(), &launcher, &schedule, shutdown).await;
    output::success(&format!("Stopped after launching {launched} markets"));
    Ok(())
}
