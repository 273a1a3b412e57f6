//! Capped, fractional Kelly sizing.

/// Default cap on any single bankroll fraction.
pub const DEFAULT_CAP: f64 = 0.05;

/// Bankroll fraction to stake on an outcome of probability `p` at decimal
/// `price`.
///
/// Returns 0 when there is no edge (`p * price <= 1`). Otherwise
/// `((price·p)^k − (1−p)^k) / ((price·p)^k + (price·(1−p))^k)`, clamped to
/// `[0, cap]`. `k = 1` is full Kelly; NaN inputs give 0.
#[must_use]
pub fn risk_fraction(p: f64, price: f64, k: f64, cap: f64) -> f64 {
    let edge = p * price - 1.0;
    if !(edge > 0.0) {
        return 0.0;
    }
    let win = (price * p).powf(k);
    let lose = (1.0 - p).powf(k);
    let fraction = (win - lose) / (win + (price * (1.0 - p)).powf(k));
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_kelly_on_an_even_money_edge() {
        assert!((risk_fraction(0.6, 2.0, 1.0, 1.0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn fraction_is_capped() {
        assert_eq!(risk_fraction(0.6, 2.0, 1.0, DEFAULT_CAP), DEFAULT_CAP);
    }

    #[test]
    fn no_edge_means_no_stake() {
        assert_eq!(risk_fraction(0.5, 2.0, 1.0, 1.0), 0.0);
        assert_eq!(risk_fraction(0.3, 2.0, 1.0, 1.0), 0.0);
        assert_eq!(risk_fraction(f64::NAN, 2.0, 1.0, 1.0), 0.0);
        assert_eq!(risk_fraction(0.6, f64::NAN, 1.0, 1.0), 0.0);
    }

    #[test]
    fn fractional_kelly_shrinks_the_stake() {
        let full = risk_fraction(0.4, 3.0, 1.0, 1.0);
        let half = risk_fraction(0.4, 3.0, 0.5, 1.0);
        assert!(half > 0.0);
        assert!(half < full);
    }
}
