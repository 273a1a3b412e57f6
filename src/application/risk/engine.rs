//! Order sizing and open-order bookkeeping.
//!
//! Candidates are sized with capped Kelly, then each fraction is shrunk by
//! every other same-market exposure: the other candidates in the batch and
//! the orders already open. The reduction is `raw_i × Π(1 − f_j)`.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::kelly::{risk_fraction, DEFAULT_CAP};
use crate::domain::id::OutcomeId;
use crate::domain::order::{ExecutionReport, Order};
use crate::domain::signal::CandidateSignal;

/// Bankroll and sizing limits.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSettings {
    /// Bankroll the fractions apply to.
    pub bankroll: Decimal,
    /// Venue minimum stake.
    pub min_size: Decimal,
    /// Kelly exponent; 1 is full Kelly.
    pub kelly_fraction: f64,
    /// Cap on any single fraction.
    pub max_fraction: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            bankroll: Decimal::from(5000),
            min_size: Decimal::from(5),
            kelly_fraction: 1.0,
            max_fraction: DEFAULT_CAP,
        }
    }
}

/// Sizes candidates into orders and remembers what is already open.
#[derive(Debug, Clone, Default)]
pub struct RiskOrderEngine {
    settings: RiskSettings,
    open: BTreeMap<OutcomeId, Order>,
}

impl RiskOrderEngine {
    /// Create an engine with no open orders.
    #[must_use]
    pub fn new(settings: RiskSettings) -> Self {
        Self {
            settings,
            open: BTreeMap::new(),
        }
    }

    /// Sizing limits.
    #[must_use]
    pub const fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Whether an order for `id` has already been executed.
    #[must_use]
    pub fn is_open(&self, id: OutcomeId) -> bool {
        self.open.contains_key(&id)
    }

    /// Executed orders, by outcome.
    #[must_use]
    pub const fn open_orders(&self) -> &BTreeMap<OutcomeId, Order> {
        &self.open
    }

    /// Size a batch of candidates. Invalid orders are dropped.
    #[must_use]
    pub fn size_orders(&self, candidates: &[CandidateSignal]) -> Vec<Order> {
        let floor = self.min_fraction();
        let actionable: Vec<(&CandidateSignal, f64)> = candidates
            .iter()
            .filter(|c| !self.is_open(c.id))
            .map(|c| (c, self.raw_fraction(c)))
            .filter(|(_, f)| *f > 0.0 && floor < *f)
            .collect();

        let open_factor: f64 = self
            .open
            .values()
            .map(|o| 1.0 - o.risk_fraction())
            .product();

        actionable
            .iter()
            .enumerate()
            .filter_map(|(i, (candidate, raw))| {
                let others: f64 = actionable
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, (_, f))| 1.0 - f)
                    .product();
                let reduced = raw * others * open_factor;
                let order = Order::new(
                    candidate.id,
                    candidate.side,
                    candidate.probability,
                    candidate.reference_price,
                    self.settings.min_size,
                    self.stake(reduced),
                    reduced,
                );
                match order.validate() {
                    Ok(()) => Some(order),
                    Err(err) => {
                        debug!(outcome_id = %candidate.id, reason = %err, "Order dropped");
                        None
                    }
                }
            })
            .collect()
    }

    /// Apply execution reports. Successful orders become open and are
    /// returned so the caller can fix their probabilities.
    pub fn reconcile(&mut self, orders: &[Order], reports: &[ExecutionReport]) -> Vec<Order> {
        let mut accepted = Vec::new();
        for order in orders {
            let success = reports
                .iter()
                .any(|r| r.id == order.id() && r.is_success());
            if success && !self.is_open(order.id()) {
                info!(
                    outcome_id = %order.id(),
                    side = %order.side(),
                    size = %order.size(),
                    price = order.reference_price(),
                    probability = order.probability(),
                    "Order executed"
                );
                self.open.insert(order.id(), order.clone());
                accepted.push(order.clone());
            }
        }
        accepted
    }

    fn raw_fraction(&self, candidate: &CandidateSignal) -> f64 {
        risk_fraction(
            candidate.probability,
            candidate.returns_price,
            self.settings.kelly_fraction,
            self.settings.max_fraction,
        )
    }

    /// `min_size / bankroll`; candidates must beat it to be worth sizing.
    fn min_fraction(&self) -> f64 {
        if self.settings.bankroll <= Decimal::ZERO {
            return f64::INFINITY;
        }
        (self.settings.min_size / self.settings.bankroll)
            .to_f64()
            .unwrap_or(f64::INFINITY)
    }

    fn stake(&self, fraction: f64) -> Decimal {
        let fraction = Decimal::try_from(fraction.max(0.0)).unwrap_or(Decimal::ZERO);
        (fraction * self.settings.bankroll).round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::ExecutionStatus;
    use crate::domain::signal::{ModelId, Side};
    use rust_decimal_macros::dec;

    fn candidate(id: u64, probability: f64, price: f64) -> CandidateSignal {
        CandidateSignal {
            id: OutcomeId::new(id),
            model_id: ModelId::HighLiquidityConsensus,
            side: Side::Buy,
            probability,
            reference_price: price,
            returns_price: price,
        }
    }

    fn uncapped() -> RiskOrderEngine {
        RiskOrderEngine::new(RiskSettings {
            max_fraction: 1.0,
            ..RiskSettings::default()
        })
    }

    #[test]
    fn single_candidate_gets_full_fraction() {
        let orders = uncapped().size_orders(&[candidate(1, 0.6, 2.0)]);
        assert_eq!(orders.len(), 1);
        assert!((orders[0].risk_fraction() - 0.4).abs() < 1e-12);
        assert_eq!(orders[0].size(), dec!(2000.00));
    }

    #[test]
    fn batch_fractions_reduce_each_other() {
        let a = risk_fraction(0.6, 2.0, 1.0, 1.0);
        let b = risk_fraction(0.5, 2.5, 1.0, 1.0);
        let orders = uncapped().size_orders(&[candidate(1, 0.6, 2.0), candidate(2, 0.5, 2.5)]);
        assert_eq!(orders.len(), 2);
        assert!((orders[0].risk_fraction() - a * (1.0 - b)).abs() < 1e-12);
        assert!((orders[1].risk_fraction() - b * (1.0 - a)).abs() < 1e-12);
    }

    #[test]
    fn candidates_below_minimum_fraction_are_skipped() {
        // fraction ~0.00078, below 5 / 5000
        let orders = uncapped().size_orders(&[candidate(1, 0.02, 51.0)]);
        assert!(orders.is_empty());
    }

    #[test]
    fn invalid_candidates_are_dropped() {
        let mut bad = candidate(0, 0.6, 2.0);
        assert!(uncapped().size_orders(&[bad.clone()]).is_empty());
        bad.id = OutcomeId::new(3);
        bad.reference_price = f64::NAN;
        assert!(uncapped().size_orders(&[bad]).is_empty());
    }

    #[test]
    fn executed_orders_block_repeat_attempts() {
        let mut engine = uncapped();
        let orders = engine.size_orders(&[candidate(1, 0.6, 2.0)]);
        let reports = [ExecutionReport::success(OutcomeId::new(1))];
        let accepted = engine.reconcile(&orders, &reports);
        assert_eq!(accepted.len(), 1);
        assert!(engine.is_open(OutcomeId::new(1)));

        assert!(engine.size_orders(&[candidate(1, 0.6, 2.0)]).is_empty());
        assert!(engine.reconcile(&orders, &reports).is_empty());
        assert_eq!(engine.open_orders().len(), 1);
    }

    #[test]
    fn open_orders_reduce_new_fractions() {
        let mut engine = uncapped();
        let first = engine.size_orders(&[candidate(1, 0.6, 2.0)]);
        engine.reconcile(&first, &[ExecutionReport::success(OutcomeId::new(1))]);

        let second = engine.size_orders(&[candidate(2, 0.6, 2.0)]);
        assert!((second[0].risk_fraction() - 0.4 * 0.6).abs() < 1e-12);
    }

    #[test]
    fn failed_reports_leave_nothing_open() {
        let mut engine = uncapped();
        let orders = engine.size_orders(&[candidate(1, 0.6, 2.0)]);
        let reports = [ExecutionReport {
            id: OutcomeId::new(1),
            status: ExecutionStatus::Failure,
        }];
        assert!(engine.reconcile(&orders, &reports).is_empty());
        assert!(!engine.is_open(OutcomeId::new(1)));
    }
}
