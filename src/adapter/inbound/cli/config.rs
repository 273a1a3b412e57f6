//! Handlers for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;
    output::success("Configuration is valid");
    output::field("Path", path.display());
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field("Dry run", config.dry_run);
    output::field("Log level", &config.logging.level);

    let exchange = &config.exchange;
    output::section("Exchange");
    output::field("API", &exchange.api_url);
    output::field("Event type", &exchange.event_type_id);
    output::field("Countries", exchange.countries.join(","));
    output::field("Poll", format!("{}ms", exchange.poll_interval_ms));
    output::field("Lookahead", format!("{}m", exchange.lookahead_minutes));
    output::field("Max markets", exchange.max_concurrent_markets);

    let risk = config.risk_settings();
    output::section("Risk");
    output::field("Bankroll", risk.bankroll);
    output::field("Min stake", risk.min_size);
    output::field("Kelly", risk.kelly_fraction);
    output::field("Cap", risk.max_fraction);
    output::field(
        "Commission",
        format!("{:.2}%", config.commission().rate() * 100.0),
    );
    Ok(())
}
