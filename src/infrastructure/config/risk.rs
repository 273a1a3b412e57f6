//! Risk and commission configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::risk::engine::RiskSettings;
use crate::application::risk::kelly::DEFAULT_CAP;
use crate::domain::price::Commission;

/// Bankroll and sizing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Bankroll the risk fractions apply to.
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
    /// Venue minimum stake.
    #[serde(default = "default_min_size")]
    pub min_size: Decimal,
    /// Kelly exponent (1.0 = full Kelly).
    #[serde(default = "default_kelly_fraction")]
    pub kelly_fraction: f64,
    /// Cap on any single bankroll fraction.
    #[serde(default = "default_max_fraction")]
    pub max_fraction: f64,
    /// Account commission discount (e.g. 0.1 = 10% off the base rate).
    #[serde(default)]
    pub commission_discount: f64,
}

fn default_bankroll() -> Decimal {
    Decimal::from(5000)
}

fn default_min_size() -> Decimal {
    Decimal::from(5)
}

const fn default_kelly_fraction() -> f64 {
    1.0
}

const fn default_max_fraction() -> f64 {
    DEFAULT_CAP
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            bankroll: default_bankroll(),
            min_size: default_min_size(),
            kelly_fraction: default_kelly_fraction(),
            max_fraction: default_max_fraction(),
            commission_discount: 0.0,
        }
    }
}

impl RiskConfig {
    /// Commission at the configured discount.
    #[must_use]
    pub const fn commission(&self) -> Commission {
        Commission::new(self.commission_discount)
    }
}

impl From<RiskConfig> for RiskSettings {
    fn from(config: RiskConfig) -> Self {
        Self {
            bankroll: config.bankroll,
            min_size: config.min_size,
            kelly_fraction: config.kelly_fraction,
            max_fraction: config.max_fraction,
        }
    }
}
