//! Handler for the `replay` command.

use crate::adapter::inbound::cli::command::ReplayArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::history::HistoricalLogFile;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::infrastructure::runtime::{run_replay, ReplaySummary};

/// Replay every file in order. Stops at the first file that cannot be read.
pub async fn execute(config: &Config, args: &ReplayArgs) -> Result<()> {
    for path in &args.files {
        let mut log = HistoricalLogFile::open(path)?;
        let summary = run_replay(
            &mut log,
            config.model_settings(),
            config.risk_settings(),
            config.commission(),
        )
        .await;

        if output::is_json() {
            output::json_output(serde_json::to_value(&summary)?);
        } else {
            print_summary(&path.display().to_string(), &summary);
        }
    }
    Ok(())
}

fn print_summary(path: &str, summary: &ReplaySummary) {
    output::section(&format!("Market {}", summary.market_id));
    output::field("File", path);
    output::field("Records", summary.records);
    output::field("Snapshots", summary.snapshots);
    output::field("Ticks", summary.ticks);
    output::field("Signals", summary.signals);
    output::field("Final state", summary.final_state);
    match summary.winner {
        Some(winner) => {
            output::field("Winner", winner);
            output::field("Winning orders", summary.winning_orders());
        }
        None => output::warning("No settlement recorded"),
    }

    if summary.orders.is_empty() {
        output::note("No orders placed");
        return;
    }
    output::field("Orders", summary.orders.len());
    for order in &summary.orders {
        output::note(&format!(
            "{} {} {} @ {} (p={:.4})",
            order.side(),
            order.id(),
            order.size(),
            order.reference_price(),
            order.probability()
        ));
    }
}
