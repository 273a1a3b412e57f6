//! Price and probability arithmetic for decimal-odds exchange markets.
//!
//! Every function here is total: invalid inputs (NaN, infinities, prices at
//! or below the valid floor, zero denominators) produce NaN instead of
//! panicking. Upstream data is frequently incomplete, so callers propagate
//! NaN and check validity only where they branch on it.

/// Venue commission charged on net winnings, before any discount.
pub const BASE_COMMISSION: f64 = 0.05;

/// Returns true when `value` is a finite number.
#[must_use]
pub fn is_number(value: f64) -> bool {
    value.is_finite()
}

/// Returns true when `price` is a finite decimal-odds price above 1.
#[must_use]
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 1.0
}

/// Returns true when `size` is a finite positive stake.
#[must_use]
pub fn is_valid_size(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

/// Divide, yielding NaN when either side is not a usable number or the
/// denominator is zero.
#[must_use]
pub fn try_divide(value: f64, denominator: f64) -> f64 {
    if is_number(value) && is_number(denominator) && denominator != 0.0 {
        value / denominator
    } else {
        f64::NAN
    }
}

/// Convert a back price into the equivalent lay price.
///
/// `lay_price(lay_price(p)) == p` for every valid `p`.
#[must_use]
pub fn lay_price(back_price: f64) -> f64 {
    if is_valid_price(back_price) {
        1.0 / (1.0 - 1.0 / back_price)
    } else {
        f64::NAN
    }
}

/// Implied probability of a price.
#[must_use]
pub fn probability_of(price: f64) -> f64 {
    try_divide(1.0, price)
}

/// Fair price of a probability.
#[must_use]
pub fn price_of(probability: f64) -> f64 {
    try_divide(1.0, probability)
}

/// Liability of a lay bet of `size` at `price`, or 0 when either is invalid.
#[must_use]
pub fn lay_liability(size: f64, price: f64) -> f64 {
    if is_valid_price(price) && is_valid_size(size) {
        size * (price - 1.0)
    } else {
        0.0
    }
}

/// Commission schedule applied to winnings.
///
/// The discount rate reduces the base commission, e.g. a 0.4 discount turns
/// 5% into 3%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commission {
    discount_rate: f64,
}

impl Commission {
    /// Create a commission schedule with the given discount rate.
    #[must_use]
    pub const fn new(discount_rate: f64) -> Self {
        Self { discount_rate }
    }

    /// The configured discount rate.
    #[must_use]
    pub const fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    /// Effective commission percentage after the discount.
    #[must_use]
    pub fn rate(&self) -> f64 {
        BASE_COMMISSION * (1.0 - self.discount_rate)
    }

    /// Price after commission is taken from the winnings.
    #[must_use]
    pub fn remove_commission(&self, price: f64) -> f64 {
        1.0 + (price - 1.0) * (1.0 - self.rate())
    }

    /// Implied probability of a price once commission is removed.
    #[must_use]
    pub fn discounted_probability(&self, price: f64) -> f64 {
        probability_of(self.remove_commission(price))
    }
}

impl Default for Commission {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Price after the undiscounted base commission is removed.
#[must_use]
pub fn remove_commission(price: f64) -> f64 {
    Commission::default().remove_commission(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn lay_price_inverts_back_price() {
        assert!((lay_price(2.0) - 2.0).abs() < EPS);
        assert!((lay_price(3.0) - 1.5).abs() < EPS);
        assert!((lay_price(1.5) - 3.0).abs() < EPS);
    }

    #[test]
    fn lay_price_is_an_involution() {
        for p in [1.01, 1.5, 2.0, 2.36, 7.8, 34.0, 1000.0] {
            let round_trip = lay_price(lay_price(p));
            assert!((round_trip - p).abs() < 1e-9 * p, "failed for {p}");
        }
    }

    #[test]
    fn lay_price_rejects_invalid_prices() {
        assert!(lay_price(1.0).is_nan());
        assert!(lay_price(0.5).is_nan());
        assert!(lay_price(0.0).is_nan());
        assert!(lay_price(f64::NAN).is_nan());
        assert!(lay_price(f64::INFINITY).is_nan());
    }

    #[test]
    fn remove_commission_applies_base_rate() {
        assert!((remove_commission(2.1) - 2.045).abs() < EPS);
        assert!((remove_commission(1.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn remove_commission_honours_discount() {
        let commission = Commission::new(0.4);
        assert!((commission.rate() - 0.03).abs() < EPS);
        assert!((commission.remove_commission(3.0) - 2.94).abs() < EPS);
    }

    #[test]
    fn remove_commission_propagates_nan() {
        assert!(remove_commission(f64::NAN).is_nan());
    }

    #[test]
    fn probability_and_price_invert() {
        assert!((probability_of(4.0) - 0.25).abs() < EPS);
        assert!((price_of(0.25) - 4.0).abs() < EPS);
        assert!(probability_of(0.0).is_nan());
        assert!(price_of(f64::NAN).is_nan());
    }

    #[test]
    fn lay_liability_uses_price_minus_one() {
        assert!((lay_liability(10.0, 3.5) - 25.0).abs() < EPS);
        assert_eq!(lay_liability(10.0, f64::NAN), 0.0);
        assert_eq!(lay_liability(0.0, 3.5), 0.0);
    }
}
