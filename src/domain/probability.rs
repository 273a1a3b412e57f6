//! Compositional (normalized) probabilities across a market's outcomes.
//!
//! Raw implied probabilities of a market's prices never sum to one: the
//! venue overround and commission push them around. The engine removes
//! commission from each price, then rescales the valid probabilities so they
//! sum to a target. The target is 1 unless some outcomes have been fixed
//! (already traded), in which case it is 1 minus their fixed probabilities.

use super::id::OutcomeId;
use super::price::{is_number, is_valid_price, price_of, Commission};

/// Normalized probability and implied price of one outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionalProbability {
    /// Outcome id.
    pub id: OutcomeId,
    /// Normalized probability; NaN when the input price was invalid.
    pub probability: f64,
    /// `1 / probability`.
    pub implied_price: f64,
}

/// Computes normalized probabilities from a set of prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionalProbabilityEngine {
    commission: Commission,
}

impl CompositionalProbabilityEngine {
    /// Create an engine that removes `commission` before normalizing.
    #[must_use]
    pub const fn new(commission: Commission) -> Self {
        Self { commission }
    }

    /// Normalize `(id, price)` items so the valid probabilities sum to `target`.
    ///
    /// Invalid prices yield a NaN probability; the item stays in the output
    /// but does not count toward the total. When no item is valid every
    /// probability is NaN.
    #[must_use]
    pub fn compose(&self, items: &[(OutcomeId, f64)], target: f64) -> Vec<CompositionalProbability> {
        let raw: Vec<f64> = items
            .iter()
            .map(|(_, price)| {
                if is_valid_price(*price) {
                    self.commission.discounted_probability(*price)
                } else {
                    f64::NAN
                }
            })
            .collect();

        let total: f64 = raw.iter().filter(|p| is_number(**p)).sum();

        items
            .iter()
            .zip(raw)
            .map(|((id, _), raw)| {
                let probability = if total > 0.0 {
                    target * raw / total
                } else {
                    f64::NAN
                };
                CompositionalProbability {
                    id: *id,
                    probability,
                    implied_price: price_of(probability),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn ids(prices: &[f64]) -> Vec<(OutcomeId, f64)> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| (OutcomeId::new(i as u64 + 1), *p))
            .collect()
    }

    #[test]
    fn two_equal_prices_split_evenly() {
        let engine = CompositionalProbabilityEngine::default();
        let out = engine.compose(&ids(&[2.1, 2.1]), 1.0);
        for item in &out {
            assert!((item.probability - 0.5).abs() < EPS);
            assert!((item.implied_price - 2.0).abs() < EPS);
        }
    }

    #[test]
    fn valid_probabilities_sum_to_target() {
        let engine = CompositionalProbabilityEngine::new(Commission::new(0.2));
        let out = engine.compose(&ids(&[1.8, 4.5, 7.0, 12.0]), 0.85);
        let sum: f64 = out.iter().map(|c| c.probability).sum();
        assert!((sum - 0.85).abs() < 1e-9);
        for item in &out {
            assert!((item.implied_price - 1.0 / item.probability).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_prices_pass_through_as_nan() {
        let engine = CompositionalProbabilityEngine::default();
        let out = engine.compose(&ids(&[2.0, f64::NAN, 2.0]), 1.0);
        assert_eq!(out.len(), 3);
        assert!(out[1].probability.is_nan());
        assert!(out[1].implied_price.is_nan());
        assert!((out[0].probability + out[2].probability - 1.0).abs() < EPS);
    }

    #[test]
    fn excluding_an_outcome_preserves_the_others() {
        let engine = CompositionalProbabilityEngine::new(Commission::new(0.1));
        let full = engine.compose(&ids(&[1.9, 3.4, 6.0, 15.0]), 1.0);

        for k in 0..full.len() {
            let rest: Vec<(OutcomeId, f64)> = ids(&[1.9, 3.4, 6.0, 15.0])
                .into_iter()
                .filter(|(id, _)| *id != full[k].id)
                .collect();
            let reduced = engine.compose(&rest, 1.0 - full[k].probability);

            for item in &reduced {
                let expected = full.iter().find(|c| c.id == item.id).unwrap();
                assert!(
                    (item.probability - expected.probability).abs() < 1e-12,
                    "outcome {} without {}",
                    item.id,
                    full[k].id
                );
            }
        }
    }

    #[test]
    fn all_invalid_gives_all_nan() {
        let engine = CompositionalProbabilityEngine::default();
        let out = engine.compose(&ids(&[f64::NAN, 0.5]), 1.0);
        assert!(out.iter().all(|c| c.probability.is_nan()));
    }
}
