//! Sized orders and their execution reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::OutcomeId;

pub use super::signal::Side;

/// An order ready for submission. Immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    id: OutcomeId,
    side: Side,
    probability: f64,
    reference_price: f64,
    min_size: Decimal,
    size: Decimal,
    risk_fraction: f64,
}

impl Order {
    /// Create an order. Call [`Order::validate`] before submitting it.
    #[must_use]
    pub const fn new(
        id: OutcomeId,
        side: Side,
        probability: f64,
        reference_price: f64,
        min_size: Decimal,
        size: Decimal,
        risk_fraction: f64,
    ) -> Self {
        Self {
            id,
            side,
            probability,
            reference_price,
            min_size,
            size,
            risk_fraction,
        }
    }

    /// Outcome the order is for.
    #[must_use]
    pub const fn id(&self) -> OutcomeId {
        self.id
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Model probability behind the order.
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Limit price.
    #[must_use]
    pub const fn reference_price(&self) -> f64 {
        self.reference_price
    }

    /// Venue minimum stake.
    #[must_use]
    pub const fn min_size(&self) -> Decimal {
        self.min_size
    }

    /// Stake.
    #[must_use]
    pub const fn size(&self) -> Decimal {
        self.size
    }

    /// Bankroll fraction this order commits, after cross-reduction.
    #[must_use]
    pub const fn risk_fraction(&self) -> f64 {
        self.risk_fraction
    }

    /// Check the order against submission rules.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: non-positive id, probability outside
    /// `(0, 1)`, non-positive price, non-positive minimum, or a size that
    /// does not exceed the minimum.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.id.is_valid() {
            return Err(DomainError::InvalidOutcomeId { id: self.id });
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(DomainError::ProbabilityOutOfRange {
                probability: self.probability,
            });
        }
        if !(self.reference_price > 0.0) {
            return Err(DomainError::NonPositivePrice {
                price: self.reference_price,
            });
        }
        if self.min_size <= Decimal::ZERO {
            return Err(DomainError::NonPositiveMinSize {
                min_size: self.min_size,
            });
        }
        if self.size <= self.min_size {
            return Err(DomainError::SizeBelowMinimum {
                size: self.size,
                min_size: self.min_size,
            });
        }
        Ok(())
    }

    /// Whether [`Order::validate`] passes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Outcome of one submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionStatus {
    /// Accepted by the venue.
    Success,
    /// Rejected, or the submission failed.
    Failure,
}

/// Per-order result returned by an order sink, matched back by outcome id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Outcome the order was for.
    pub id: OutcomeId,
    /// Execution status.
    pub status: ExecutionStatus,
}

impl ExecutionReport {
    /// Report a successful execution.
    #[must_use]
    pub const fn success(id: OutcomeId) -> Self {
        Self {
            id,
            status: ExecutionStatus::Success,
        }
    }

    /// Report a failed execution.
    #[must_use]
    pub const fn failure(id: OutcomeId) -> Self {
        Self {
            id,
            status: ExecutionStatus::Failure,
        }
    }

    /// Whether the order was accepted.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(id: u64, probability: f64, price: f64, size: Decimal) -> Order {
        Order::new(
            OutcomeId::new(id),
            Side::Buy,
            probability,
            price,
            dec!(5),
            size,
            0.01,
        )
    }

    #[test]
    fn valid_order_passes() {
        assert!(order(7, 0.4, 3.0, dec!(20)).validate().is_ok());
    }

    #[test]
    fn rejects_probability_at_bounds() {
        assert!(matches!(
            order(7, 1.0, 3.0, dec!(20)).validate(),
            Err(DomainError::ProbabilityOutOfRange { .. })
        ));
        assert!(matches!(
            order(7, 0.0, 3.0, dec!(20)).validate(),
            Err(DomainError::ProbabilityOutOfRange { .. })
        ));
        assert!(!order(7, f64::NAN, 3.0, dec!(20)).is_valid());
    }

    #[test]
    fn rejects_nan_price() {
        assert!(matches!(
            order(7, 0.4, f64::NAN, dec!(20)).validate(),
            Err(DomainError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn size_must_exceed_minimum() {
        assert!(matches!(
            order(7, 0.4, 3.0, dec!(5)).validate(),
            Err(DomainError::SizeBelowMinimum { .. })
        ));
        assert!(order(7, 0.4, 3.0, dec!(5.01)).is_valid());
    }

    #[test]
    fn rejects_non_positive_minimum() {
        let order = Order::new(
            OutcomeId::new(7),
            Side::Sell,
            0.4,
            3.0,
            Decimal::ZERO,
            dec!(20),
            0.01,
        );
        assert!(matches!(
            order.validate(),
            Err(DomainError::NonPositiveMinSize { .. })
        ));
    }
}
