//! Time-series helpers for the trend model.

use super::price::is_number;

/// Minimum number of usable points for a fit.
pub const MIN_FIT_POINTS: usize = 3;

/// Result of a straight-line fit `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Value at `x = 0`.
    pub intercept: f64,
    /// Change in `y` per unit `x`.
    pub slope: f64,
}

impl LinearFit {
    /// A fit with no usable data.
    pub const UNDEFINED: Self = Self {
        intercept: f64::NAN,
        slope: f64::NAN,
    };

    /// Whether both coefficients are finite.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        is_number(self.intercept) && is_number(self.slope)
    }
}

/// Log returns of a price series: `r[0]` is NaN, `r[t] = ln(p[t] / p[t-1])`.
///
/// Non-positive or NaN prices make the affected returns NaN.
#[must_use]
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return out;
    }
    out.push(f64::NAN);
    out.extend(prices.windows(2).map(|w| {
        let ratio = w[1] / w[0];
        if is_number(ratio) && ratio > 0.0 {
            ratio.ln()
        } else {
            f64::NAN
        }
    }));
    out
}

/// Regression weight for a liquidity size: `ln(max(size, 1))`.
#[must_use]
pub fn liquidity_weight(size: f64) -> f64 {
    if size.is_nan() {
        return 0.0;
    }
    size.max(1.0).ln()
}

/// Weighted least-squares fit of `y` on `x`.
///
/// Points with a non-positive weight or a non-finite coordinate are
/// ignored. Fewer than [`MIN_FIT_POINTS`] usable points, or no spread in
/// `x`, give [`LinearFit::UNDEFINED`].
#[must_use]
pub fn weighted_linear_fit(x: &[f64], y: &[f64], w: &[f64]) -> LinearFit {
    let points: Vec<(f64, f64, f64)> = x
        .iter()
        .zip(y)
        .zip(w)
        .map(|((x, y), w)| (*x, *y, *w))
        .filter(|(x, y, w)| is_number(*x) && is_number(*y) && is_number(*w) && *w > 0.0)
        .collect();

    if points.len() < MIN_FIT_POINTS {
        return LinearFit::UNDEFINED;
    }

    let total_weight: f64 = points.iter().map(|(_, _, w)| w).sum();
    let mean_x = points.iter().map(|(x, _, w)| w * x).sum::<f64>() / total_weight;
    let mean_y = points.iter().map(|(_, y, w)| w * y).sum::<f64>() / total_weight;

    let sxx: f64 = points.iter().map(|(x, _, w)| w * (x - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|(x, y, w)| w * (x - mean_x) * (y - mean_y))
        .sum();

    if sxx == 0.0 {
        return LinearFit::UNDEFINED;
    }

    let slope = sxy / sxx;
    LinearFit {
        intercept: mean_y - slope * mean_x,
        slope,
    }
}
