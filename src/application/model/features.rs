//! Per-outcome model inputs drawn from the ledger.

use serde::Deserialize;

use crate::domain::ledger::{ColumnKey, MarketLedger, Variable};
use crate::domain::outcome::OutcomeRecord;
use crate::domain::price::{try_divide, Commission};
use crate::domain::regression::{liquidity_weight, log_returns, weighted_linear_fit, LinearFit};

/// Series the trend regression is fitted on.
///
/// On `Price` the intercept is the fitted price at the start, which is
/// positive for any real price, so the trend rule's intercept ceiling
/// effectively disables it. Use `LogReturns` to run the trend rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionInput {
    /// Compositional SP back price.
    #[default]
    Price,
    /// Log returns of the compositional SP back price.
    LogReturns,
}

/// Everything the rules need to know about one outcome at one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeFeatures {
    /// Compositional starting-price probability.
    pub sp_probability: f64,
    /// Compositional exchange-average probability.
    pub ex_probability: f64,
    /// Exchange plus SP back stake.
    pub back_size: f64,
    /// This outcome's share of the market's back stake.
    pub market_share: f64,
    /// Best offered back price.
    pub reference_price: f64,
    /// Reference price after commission.
    pub returns_price: f64,
    /// Trend fit over elapsed time.
    pub fit: LinearFit,
    /// Most recent log return of the compositional SP back price.
    pub last_log_return: f64,
}

impl OutcomeFeatures {
    /// Extract features for `record` from `ledger`.
    #[must_use]
    pub fn extract(
        ledger: &MarketLedger,
        record: &OutcomeRecord,
        commission: Commission,
        input: RegressionInput,
    ) -> Self {
        let id = record.id;
        let back_size = record.combined_back_size();
        let market_back_size = ledger.last_entry(ColumnKey::market(Variable::MarketBackSize));

        let x: Vec<f64> = ledger.index().into_iter().map(|t| t as f64).collect();
        let prices = ledger.column(ColumnKey::outcome(Variable::CompositionalSpBackPrice, id));
        let weights: Vec<f64> = ledger
            .column(ColumnKey::outcome(Variable::CombinedBackSize, id))
            .into_iter()
            .map(liquidity_weight)
            .collect();
        let returns = log_returns(&prices);

        let fit = match input {
            RegressionInput::Price => weighted_linear_fit(&x, &prices, &weights),
            RegressionInput::LogReturns => weighted_linear_fit(&x, &returns, &weights),
        };

        Self {
            sp_probability: ledger
                .last_entry(ColumnKey::outcome(Variable::CompositionalSpProbability, id)),
            ex_probability: ledger.last_entry(ColumnKey::outcome(
                Variable::CompositionalExAverageProbability,
                id,
            )),
            back_size,
            market_share: try_divide(back_size, market_back_size),
            reference_price: record.ex_offered_back_price,
            returns_price: commission.remove_commission(record.ex_offered_back_price),
            fit,
            last_log_return: returns.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Whether `probability` beats the commission-adjusted reference price.
    #[must_use]
    pub fn overlay(&self, probability: f64) -> bool {
        probability > try_divide(1.0, self.returns_price)
    }
}
