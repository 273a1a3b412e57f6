//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; venue credentials never live in
//! it and are read from the environment instead (see
//! [`Credentials::from_env`](crate::adapter::outbound::exchange::Credentials::from_env)).
//!
//! # Example
//!
//! ```no_run
//! use laybook::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::LoggingConfig;
use super::model::ModelConfig;
use super::risk::RiskConfig;
use crate::adapter::outbound::exchange::settings::ExchangeConfig;
use crate::application::model::trend::ModelSettings;
use crate::application::risk::engine::RiskSettings;
use crate::domain::price::Commission;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section except `[logging]` has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// Venue endpoints and market discovery.
    #[serde(default)]
    pub exchange: ExchangeConfig,

    /// Signal model thresholds.
    #[serde(default)]
    pub model: ModelConfig,

    /// Bankroll, sizing and commission.
    #[serde(default)]
    pub risk: RiskConfig,

    /// Enable dry-run mode.
    ///
    /// When true, live markets are traded against the paper sink: signals
    /// and sizes are real, no order reaches the venue.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if let Err(reason) = self.logging.filter() {
            return Err(invalid("level", reason));
        }

        let exchange = &self.exchange;
        if exchange.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if exchange.login_url.is_empty() {
            return Err(ConfigError::MissingField { field: "login_url" }.into());
        }
        if exchange.event_type_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "event_type_id",
            }
            .into());
        }
        if exchange.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be greater than 0"));
        }
        if exchange.lookahead_minutes <= 0 {
            return Err(invalid("lookahead_minutes", "must be greater than 0"));
        }
        if exchange.max_concurrent_markets == 0 {
            return Err(invalid("max_concurrent_markets", "must be greater than 0"));
        }

        let model = &self.model;
        if !(model.consensus_min_share > 0.0 && model.consensus_min_share <= 1.0) {
            return Err(invalid("consensus_min_share", "must be in (0, 1]"));
        }
        if !(model.consensus_price_split > 1.0) {
            return Err(invalid("consensus_price_split", "must be greater than 1"));
        }
        for (field, value) in [
            ("trend_min_back_size", model.trend_min_back_size),
            (
                "trend_min_back_size_unrestricted",
                model.trend_min_back_size_unrestricted,
            ),
            ("high_price_min_back_size", model.high_price_min_back_size),
            ("low_price_min_back_size", model.low_price_min_back_size),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(field, "must be 0 or greater"));
            }
        }

        let risk = &self.risk;
        if risk.bankroll <= Decimal::ZERO {
            return Err(invalid("bankroll", "must be greater than 0"));
        }
        if risk.min_size <= Decimal::ZERO {
            return Err(invalid("min_size", "must be greater than 0"));
        }
        if risk.min_size >= risk.bankroll {
            return Err(invalid("min_size", "must be less than bankroll"));
        }
        if !(risk.kelly_fraction > 0.0) {
            return Err(invalid("kelly_fraction", "must be greater than 0"));
        }
        if !(risk.max_fraction > 0.0 && risk.max_fraction <= 1.0) {
            return Err(invalid("max_fraction", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&risk.commission_discount) {
            return Err(invalid("commission_discount", "must be between 0 and 1"));
        }
        Ok(())
    }

    /// Model thresholds as used by the application layer.
    #[must_use]
    pub fn model_settings(&self) -> ModelSettings {
        self.model.clone().into()
    }

    /// Risk limits as used by the application layer.
    #[must_use]
    pub fn risk_settings(&self) -> RiskSettings {
        self.risk.clone().into()
    }

    /// Commission at the configured discount.
    #[must_use]
    pub const fn commission(&self) -> Commission {
        self.risk.commission()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
