//! Domain validation errors for core domain types.
//!
//! These errors are returned when a domain invariant is violated: an order
//! that fails pre-submission validation, or a ledger operation asked to do
//! something its data cannot support.
//!
//! # Examples
//!
//! ```
//! use laybook::domain::error::DomainError;
//! use laybook::domain::id::OutcomeId;
//! use laybook::domain::order::{Order, Side};
//! use rust_decimal_macros::dec;
//!
//! let order = Order::new(OutcomeId::new(0), Side::Buy, 0.4, 3.0, dec!(5), dec!(20), 0.004);
//! assert!(matches!(order.validate(), Err(DomainError::InvalidOutcomeId { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::OutcomeId;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Outcome ids must be strictly positive.
    #[error("outcome id must be positive, got {id}")]
    InvalidOutcomeId {
        /// The rejected id.
        id: OutcomeId,
    },

    /// Order probability must lie strictly between 0 and 1.
    #[error("probability must be in (0, 1), got {probability}")]
    ProbabilityOutOfRange {
        /// The rejected probability.
        probability: f64,
    },

    /// Reference price must be positive.
    #[error("reference price must be positive, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: f64,
    },

    /// The venue minimum stake must be positive.
    #[error("minimum size must be positive, got {min_size}")]
    NonPositiveMinSize {
        /// The rejected minimum size.
        min_size: Decimal,
    },

    /// Order size must exceed the venue minimum stake.
    #[error("size {size} must be greater than minimum size {min_size}")]
    SizeBelowMinimum {
        /// The order size.
        size: Decimal,
        /// The venue minimum.
        min_size: Decimal,
    },

    /// A column used as a row index contained a non-finite value.
    #[error("column {column} cannot be used as an index: non-finite value at row {row}")]
    InvalidIndexColumn {
        /// Column name.
        column: String,
        /// Position of the offending row.
        row: usize,
    },
}
