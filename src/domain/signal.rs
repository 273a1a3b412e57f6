//! Trade signals produced by the model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::OutcomeId;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Back the outcome.
    Buy,
    /// Lay the outcome.
    Sell,
}

impl Side {
    /// Stable name used in logs and venue payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which model rule produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    /// Trend-confirmed starting-price rule.
    #[serde(rename = "SPMB")]
    TrendConfirmed,
    /// High-price, high-liquidity consensus rule.
    #[serde(rename = "MBG2")]
    HighLiquidityConsensus,
    /// Low-price consensus rule.
    #[serde(rename = "MBL2")]
    LowPriceConsensus,
}

impl ModelId {
    /// Short code recorded with each order.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TrendConfirmed => "SPMB",
            Self::HighLiquidityConsensus => "MBG2",
            Self::LowPriceConsensus => "MBL2",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A one-tick trade candidate. Not retained across ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSignal {
    /// Outcome to trade.
    pub id: OutcomeId,
    /// Rule that fired.
    pub model_id: ModelId,
    /// Side to take.
    pub side: Side,
    /// Model probability.
    pub probability: f64,
    /// Best offered price at signal time.
    pub reference_price: f64,
    /// Reference price after commission.
    pub returns_price: f64,
}
