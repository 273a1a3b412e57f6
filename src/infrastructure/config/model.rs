//! Signal model configuration.

use serde::Deserialize;

use crate::application::model::features::RegressionInput;
use crate::application::model::trend::ModelSettings;

/// Thresholds for the trend and consensus rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Trend rule back-size minimum in the restricted jurisdiction.
    pub trend_min_back_size: f64,
    /// Trend rule back-size minimum elsewhere.
    pub trend_min_back_size_unrestricted: f64,
    /// Jurisdiction that gets the stricter trend minimum.
    pub restricted_jurisdiction: String,
    /// Intercept must fall below this for a trend.
    pub trend_intercept_ceiling: f64,
    /// `price` or `log_returns`. The trend rule only fires on `log_returns`.
    pub regression_input: RegressionInput,
    pub consensus_price_split: f64,
    /// Share of the market's back stake, in `(0, 1]`.
    pub consensus_min_share: f64,
    pub high_price_min_back_size: f64,
    pub low_price_min_back_size: f64,
    /// Country codes the consensus rules run in; empty means all.
    pub consensus_jurisdictions: Vec<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        let s = ModelSettings::default();
        Self {
            trend_min_back_size: s.trend_min_back_size,
            trend_min_back_size_unrestricted: s.trend_min_back_size_unrestricted,
            restricted_jurisdiction: s.restricted_jurisdiction,
            trend_intercept_ceiling: s.trend_intercept_ceiling,
            regression_input: s.regression_input,
            consensus_price_split: s.consensus_price_split,
            consensus_min_share: s.consensus_min_share,
            high_price_min_back_size: s.high_price_min_back_size,
            low_price_min_back_size: s.low_price_min_back_size,
            consensus_jurisdictions: s.consensus_jurisdictions,
        }
    }
}

impl From<ModelConfig> for ModelSettings {
    fn from(config: ModelConfig) -> Self {
        Self {
            trend_min_back_size: config.trend_min_back_size,
            trend_min_back_size_unrestricted: config.trend_min_back_size_unrestricted,
            restricted_jurisdiction: config.restricted_jurisdiction,
            trend_intercept_ceiling: config.trend_intercept_ceiling,
            regression_input: config.regression_input,
            consensus_price_split: config.consensus_price_split,
            consensus_min_share: config.consensus_min_share,
            high_price_min_back_size: config.high_price_min_back_size,
            low_price_min_back_size: config.low_price_min_back_size,
            consensus_jurisdictions: config.consensus_jurisdictions,
        }
    }
}
