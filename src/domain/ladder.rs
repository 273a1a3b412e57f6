//! Price ladders and per-outcome reconstructed state.
//!
//! - [`LadderPrice`] - A totally ordered price key
//! - [`Ladder`] - `price → size` map with upsert/delete semantics
//! - [`RunnerState`] - Everything known about one outcome while replaying a
//!   delta stream: back/lay/traded ladders, starting-price fields, removal

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::price::{is_valid_price, is_valid_size, lay_liability, lay_price};

/// A price usable as an ordered map key.
///
/// Ordering follows `f64::total_cmp`, so every value (including NaN) has a
/// stable position; invalid prices are filtered at read time rather than at
/// insert time.
#[derive(Debug, Clone, Copy)]
pub struct LadderPrice(f64);

impl LadderPrice {
    /// Wrap a price.
    #[must_use]
    pub const fn new(price: f64) -> Self {
        Self(price)
    }

    /// The wrapped price.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for LadderPrice {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LadderPrice {}

impl PartialOrd for LadderPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LadderPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A price ladder: size available (or traded) at each price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ladder {
    levels: BTreeMap<LadderPrice, f64>,
}

impl Ladder {
    /// Create an empty ladder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one delta: a non-zero size replaces the level, zero removes it.
    pub fn apply(&mut self, price: f64, size: f64) {
        if size == 0.0 {
            self.remove(price);
        } else {
            self.upsert(price, size);
        }
    }

    /// Insert or replace the size at `price`.
    pub fn upsert(&mut self, price: f64, size: f64) {
        self.levels.insert(LadderPrice::new(price), size);
    }

    /// Remove the level at `price`, if present.
    pub fn remove(&mut self, price: f64) {
        self.levels.remove(&LadderPrice::new(price));
    }

    /// Size at `price`.
    #[must_use]
    pub fn size_at(&self, price: f64) -> Option<f64> {
        self.levels.get(&LadderPrice::new(price)).copied()
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// True when the ladder has no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels whose price and size are both valid, ascending by price.
    pub fn valid_levels(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.levels
            .iter()
            .map(|(price, size)| (price.value(), *size))
            .filter(|(price, size)| is_valid_price(*price) && is_valid_size(*size))
    }

    /// Highest valid price, NaN when none.
    #[must_use]
    pub fn highest_price(&self) -> f64 {
        self.valid_prices().last().unwrap_or(f64::NAN)
    }

    /// Lowest valid price, NaN when none.
    #[must_use]
    pub fn lowest_price(&self) -> f64 {
        self.valid_prices().next().unwrap_or(f64::NAN)
    }

    /// Sum of valid sizes.
    #[must_use]
    pub fn total_size(&self) -> f64 {
        self.valid_levels().map(|(_, size)| size).sum()
    }

    /// Size-weighted mean price, NaN when there is no valid volume.
    #[must_use]
    pub fn weighted_average_price(&self) -> f64 {
        let total = self.total_size();
        if total > 0.0 {
            self.valid_levels().map(|(p, s)| p * s).sum::<f64>() / total
        } else {
            f64::NAN
        }
    }

    /// Total volume expressed as lay liability.
    #[must_use]
    pub fn total_liability(&self) -> f64 {
        self.valid_levels().map(|(p, s)| lay_liability(s, p)).sum()
    }

    /// Liability-weighted mean lay price, NaN when there is no liability.
    #[must_use]
    pub fn weighted_average_lay_price(&self) -> f64 {
        let total = self.total_liability();
        if total > 0.0 {
            self.valid_levels()
                .map(|(p, s)| lay_price(p) * lay_liability(s, p))
                .sum::<f64>()
                / total
        } else {
            f64::NAN
        }
    }

    fn valid_prices(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        self.levels
            .iter()
            .filter(|(price, size)| is_valid_price(price.value()) && is_valid_size(**size))
            .map(|(price, _)| price.value())
    }
}

impl FromIterator<(f64, f64)> for Ladder {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut ladder = Self::new();
        for (price, size) in iter {
            ladder.upsert(price, size);
        }
        ladder
    }
}

/// Starting-price state of a reconstructed outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartingPriceState {
    /// Projected starting price.
    pub near_price: Option<f64>,
    /// Back stake taken at SP, by price.
    pub back_stake_taken: Ladder,
    /// Lay liability taken at SP, by price.
    pub lay_liability_taken: Ladder,
}

/// Reconstructed state of one outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerState {
    /// Available-to-back ladder.
    pub available_to_back: Ladder,
    /// Available-to-lay ladder.
    pub available_to_lay: Ladder,
    /// Traded volume ladder.
    pub traded: Ladder,
    /// Starting-price fields.
    pub sp: StartingPriceState,
    /// Epoch seconds of withdrawal; final once set.
    pub removal_date: Option<i64>,
}

impl RunnerState {
    /// Record a removal date unless one is already set.
    pub fn mark_removed(&mut self, removal_date: i64) {
        if self.removal_date.is_none() {
            self.removal_date = Some(removal_date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_upserts_and_deletes() {
        let mut ladder = Ladder::new();
        ladder.apply(3.5, 20.0);
        ladder.apply(3.5, 35.0);
        ladder.apply(3.6, 10.0);
        assert_eq!(ladder.size_at(3.5), Some(35.0));
        assert_eq!(ladder.len(), 2);

        ladder.apply(3.5, 0.0);
        assert_eq!(ladder.size_at(3.5), None);
        assert_eq!(ladder.len(), 1);
    }

    #[test]
    fn removing_a_missing_level_is_a_no_op() {
        let mut ladder = Ladder::new();
        ladder.apply(2.0, 0.0);
        assert!(ladder.is_empty());
    }

    #[test]
    fn best_prices_skip_invalid_levels() {
        let mut ladder = Ladder::new();
        ladder.upsert(1.0, 50.0);
        ladder.upsert(2.5, 10.0);
        ladder.upsert(2.8, 5.0);
        ladder.upsert(4.0, -1.0);
        assert_eq!(ladder.highest_price(), 2.8);
        assert_eq!(ladder.lowest_price(), 2.5);
    }

    #[test]
    fn empty_ladder_prices_are_nan() {
        let ladder = Ladder::new();
        assert!(ladder.highest_price().is_nan());
        assert!(ladder.weighted_average_price().is_nan());
        assert_eq!(ladder.total_size(), 0.0);
    }

    #[test]
    fn weighted_averages() {
        let mut ladder = Ladder::new();
        ladder.upsert(2.0, 100.0);
        ladder.upsert(3.0, 100.0);
        assert!((ladder.weighted_average_price() - 2.5).abs() < 1e-12);
        // liabilities 100 and 200, lay prices 2.0 and 1.5
        assert!((ladder.total_liability() - 300.0).abs() < 1e-12);
        let expected = (2.0 * 100.0 + 1.5 * 200.0) / 300.0;
        assert!((ladder.weighted_average_lay_price() - expected).abs() < 1e-12);
    }

    #[test]
    fn removal_date_is_final() {
        let mut state = RunnerState::default();
        state.mark_removed(100);
        state.mark_removed(200);
        assert_eq!(state.removal_date, Some(100));
    }
}
