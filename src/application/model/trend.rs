//! Trend/edge signal model.
//!
//! Three priority-ordered rules, evaluated per outcome; the first that
//! matches produces the outcome's only signal for the tick:
//!
//! - **Trend confirmed** (`SPMB`): falling trend, enough liquidity, and the
//!   starting-price probability beats the offered price.
//! - **High-liquidity consensus** (`MBG2`): offered price above 2, the outcome
//!   holds most of the market's back stake, and the exchange-average
//!   probability beats the offered price.
//! - **Low-price consensus** (`MBL2`): the same idea for short prices, with a
//!   share requirement that grows as the price shortens.

use tracing::debug;

use super::features::{OutcomeFeatures, RegressionInput};
use crate::domain::ledger::MarketLedger;
use crate::domain::outcome::OutcomeRecord;
use crate::domain::price::Commission;
use crate::domain::signal::{CandidateSignal, ModelId, Side};
use crate::domain::snapshot::MarketSnapshot;

/// Thresholds for the signal rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Trend rule back-size minimum in the restricted jurisdiction.
    pub trend_min_back_size: f64,
    /// Trend rule back-size minimum elsewhere.
    pub trend_min_back_size_unrestricted: f64,
    /// Jurisdiction that gets the stricter trend minimum.
    pub restricted_jurisdiction: String,
    /// Intercept must fall below this for a trend.
    pub trend_intercept_ceiling: f64,
    /// Series used for the trend fit.
    pub regression_input: RegressionInput,
    /// Offered price separating the high- and low-price consensus rules.
    pub consensus_price_split: f64,
    /// Minimum share of the market's back stake for consensus rules.
    pub consensus_min_share: f64,
    /// High-price consensus back-size minimum.
    pub high_price_min_back_size: f64,
    /// Low-price consensus back-size minimum.
    pub low_price_min_back_size: f64,
    /// Jurisdictions the consensus rules run in; empty means all.
    pub consensus_jurisdictions: Vec<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            trend_min_back_size: 30_000.0,
            trend_min_back_size_unrestricted: 5_000.0,
            restricted_jurisdiction: "GB".into(),
            trend_intercept_ceiling: -0.00001,
            regression_input: RegressionInput::Price,
            consensus_price_split: 2.0,
            consensus_min_share: 0.6,
            high_price_min_back_size: 20_000.0,
            low_price_min_back_size: 10_000.0,
            consensus_jurisdictions: Vec::new(),
        }
    }
}

/// Produces candidate signals from a market's ledger and latest snapshot.
#[derive(Debug, Clone)]
pub struct TrendSignalModel {
    settings: ModelSettings,
    commission: Commission,
}

impl TrendSignalModel {
    /// Create a model.
    #[must_use]
    pub const fn new(settings: ModelSettings, commission: Commission) -> Self {
        Self {
            settings,
            commission,
        }
    }

    /// The model's thresholds.
    #[must_use]
    pub const fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Evaluate every live outcome of `snapshot`. Zero signals is normal.
    ///
    /// `jurisdiction` is the market's country code, when known.
    #[must_use]
    pub fn signals(
        &self,
        ledger: &MarketLedger,
        snapshot: &MarketSnapshot,
        jurisdiction: Option<&str>,
    ) -> Vec<CandidateSignal> {
        snapshot
            .outcomes
            .iter()
            .filter(|record| !record.is_removed())
            .filter_map(|record| self.evaluate(ledger, record, jurisdiction))
            .collect()
    }

    fn evaluate(
        &self,
        ledger: &MarketLedger,
        record: &OutcomeRecord,
        jurisdiction: Option<&str>,
    ) -> Option<CandidateSignal> {
        let s = &self.settings;
        let f = OutcomeFeatures::extract(ledger, record, self.commission, s.regression_input);

        let (model_id, probability) = if self.trend_confirmed(&f, jurisdiction) {
            (ModelId::TrendConfirmed, f.sp_probability)
        } else if self.consensus_allowed(jurisdiction)
            && f.reference_price > s.consensus_price_split
            && f.market_share >= s.consensus_min_share
            && f.back_size >= s.high_price_min_back_size
            && f.overlay(f.ex_probability)
        {
            (ModelId::HighLiquidityConsensus, f.ex_probability)
        } else if self.consensus_allowed(jurisdiction)
            && f.reference_price <= s.consensus_price_split
            && f.market_share >= s.consensus_min_share.max(1.0 / f.reference_price)
            && f.back_size >= s.low_price_min_back_size
            && f.overlay(f.ex_probability)
        {
            (ModelId::LowPriceConsensus, f.ex_probability)
        } else {
            return None;
        };

        debug!(
            outcome_id = %record.id,
            model_id = %model_id,
            probability,
            reference_price = f.reference_price,
            slope = f.fit.slope,
            intercept = f.fit.intercept,
            market_share = f.market_share,
            "Signal produced"
        );

        Some(CandidateSignal {
            id: record.id,
            model_id,
            side: Side::Buy,
            probability,
            reference_price: f.reference_price,
            returns_price: f.returns_price,
        })
    }

    fn trend_confirmed(&self, f: &OutcomeFeatures, jurisdiction: Option<&str>) -> bool {
        let s = &self.settings;
        let min_back_size = match jurisdiction {
            Some(code) if code != s.restricted_jurisdiction => s.trend_min_back_size_unrestricted,
            _ => s.trend_min_back_size,
        };
        f.fit.slope < 0.0
            && f.fit.intercept < s.trend_intercept_ceiling
            && f.back_size >= min_back_size
            && f.overlay(f.sp_probability)
    }

    fn consensus_allowed(&self, jurisdiction: Option<&str>) -> bool {
        let allowed = &self.settings.consensus_jurisdictions;
        allowed.is_empty() || jurisdiction.is_some_and(|code| allowed.iter().any(|a| a == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::OutcomeId;
    use crate::domain::ledger::{ColumnKey, Row, Variable};

    struct Tick {
        t: f64,
        sp_price: f64,
        sp_probability: f64,
        ex_probability: f64,
        back_size: f64,
        market_back_size: f64,
    }

    fn ledger(ticks: &[Tick]) -> MarketLedger {
        let id = OutcomeId::new(1);
        let mut ledger = MarketLedger::with_index(ColumnKey::market(Variable::ElapsedSeconds));
        for tick in ticks {
            let row: Row = [
                (ColumnKey::market(Variable::ElapsedSeconds), tick.t),
                (ColumnKey::market(Variable::MarketBackSize), tick.market_back_size),
                (ColumnKey::outcome(Variable::CombinedBackSize, id), tick.back_size),
                (
                    ColumnKey::outcome(Variable::CompositionalSpBackPrice, id),
                    tick.sp_price,
                ),
                (
                    ColumnKey::outcome(Variable::CompositionalSpProbability, id),
                    tick.sp_probability,
                ),
                (
                    ColumnKey::outcome(Variable::CompositionalExAverageProbability, id),
                    tick.ex_probability,
                ),
            ]
            .into_iter()
            .collect();
            ledger.add_rows(&MarketLedger::from_row(row)).unwrap();
        }
        ledger
    }

    fn record(offered: f64, back_size: f64) -> OutcomeRecord {
        let mut record = OutcomeRecord::empty(OutcomeId::new(1));
        record.ex_offered_back_price = offered;
        record.ex_back_size = back_size;
        record
    }

    fn flat(ex_probability: f64, back_size: f64, market_back_size: f64) -> Vec<Tick> {
        (0..3)
            .map(|i| Tick {
                t: -10.0 + f64::from(i),
                sp_price: 3.0,
                sp_probability: 0.2,
                ex_probability,
                back_size,
                market_back_size,
            })
            .collect()
    }

    fn run(
        model: &TrendSignalModel,
        ticks: &[Tick],
        rec: OutcomeRecord,
        j: Option<&str>,
    ) -> Vec<CandidateSignal> {
        let snapshot = MarketSnapshot::new(0, false, vec![rec]);
        model.signals(&ledger(ticks), &snapshot, j)
    }

    #[test]
    fn high_liquidity_consensus_fires_above_price_split() {
        let model = TrendSignalModel::new(ModelSettings::default(), Commission::default());
        let signals = run(&model, &flat(0.45, 25_000.0, 30_000.0), record(2.5, 25_000.0), Some("GB"));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].model_id, ModelId::HighLiquidityConsensus);
        assert_eq!(signals[0].probability, 0.45);
        assert_eq!(signals[0].side, Side::Buy);
        assert_eq!(signals[0].reference_price, 2.5);
        assert!((signals[0].returns_price - 2.425).abs() < 1e-12);
    }

    #[test]
    fn consensus_needs_share_and_liquidity() {
        let model = TrendSignalModel::new(ModelSettings::default(), Commission::default());
        // share 25/50 = 0.5 < 0.6
        assert!(run(&model, &flat(0.45, 25_000.0, 50_000.0), record(2.5, 25_000.0), None).is_empty());
        // back size below 20,000
        assert!(run(&model, &flat(0.45, 15_000.0, 16_000.0), record(2.5, 15_000.0), None).is_empty());
        // no edge over the offered price
        assert!(run(&model, &flat(0.40, 25_000.0, 30_000.0), record(2.5, 25_000.0), None).is_empty());
    }

    #[test]
    fn low_price_consensus_share_scales_with_price() {
        let model = TrendSignalModel::new(ModelSettings::default(), Commission::default());
        // 1/1.5 = 0.667 share needed; 0.7 passes
        let signals = run(&model, &flat(0.8, 14_000.0, 20_000.0), record(1.5, 14_000.0), None);
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].model_id, ModelId::LowPriceConsensus);
        // 0.65 fails
        assert!(run(&model, &flat(0.8, 13_000.0, 20_000.0), record(1.5, 13_000.0), None).is_empty());
    }

    #[test]
    fn consensus_allow_list_gates_jurisdictions() {
        let settings = ModelSettings {
            consensus_jurisdictions: vec!["AU".into()],
            ..ModelSettings::default()
        };
        let model = TrendSignalModel::new(settings, Commission::default());
        let ticks = flat(0.45, 25_000.0, 30_000.0);
        assert!(run(&model, &ticks, record(2.5, 25_000.0), Some("GB")).is_empty());
        assert!(run(&model, &ticks, record(2.5, 25_000.0), None).is_empty());
        assert_eq!(run(&model, &ticks, record(2.5, 25_000.0), Some("AU")).len(), 1);
    }

    fn falling_returns() -> Vec<Tick> {
        // prices shorten faster and faster: log returns trend down and stay negative
        [4.0, 3.9, 3.7, 3.4]
            .iter()
            .enumerate()
            .map(|(i, p)| Tick {
                t: -40.0 + 10.0 * i as f64,
                sp_price: *p,
                sp_probability: 0.4,
                ex_probability: 0.1,
                back_size: 8_000.0,
                market_back_size: 40_000.0,
            })
            .collect()
    }

    #[test]
    fn trend_rule_uses_jurisdiction_liquidity() {
        let settings = ModelSettings {
            regression_input: RegressionInput::LogReturns,
            ..ModelSettings::default()
        };
        let model = TrendSignalModel::new(settings, Commission::default());

        let signals = run(&model, &falling_returns(), record(3.0, 8_000.0), Some("IE"));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].model_id, ModelId::TrendConfirmed);
        assert_eq!(signals[0].probability, 0.4);

        // 8,000 is below the restricted-jurisdiction minimum
        assert!(run(&model, &falling_returns(), record(3.0, 8_000.0), Some("GB")).is_empty());
    }

    #[test]
    fn price_regression_never_confirms_a_trend() {
        // same falling series; the fitted intercept is a price, far above the ceiling
        let model = TrendSignalModel::new(ModelSettings::default(), Commission::default());
        assert_eq!(model.settings().regression_input, RegressionInput::Price);
        assert!(run(&model, &falling_returns(), record(3.0, 8_000.0), Some("IE")).is_empty());
    }

    #[test]
    fn removed_outcomes_are_skipped() {
        let model = TrendSignalModel::new(ModelSettings::default(), Commission::default());
        let mut rec = record(2.5, 25_000.0);
        rec.removal_date = Some(1);
        assert!(run(&model, &flat(0.45, 25_000.0, 30_000.0), rec, None).is_empty());
    }
}
