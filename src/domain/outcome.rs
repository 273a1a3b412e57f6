//! Normalized per-outcome market data.

use super::id::OutcomeId;

/// One selectable outcome within a market at one point in time.
///
/// Every numeric field is always present: sizes default to 0 and prices to
/// NaN, so downstream arithmetic never branches on absence. The removal date
/// is the one legitimately optional value; once set it never clears.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRecord {
    /// Venue id, stable for the market's lifetime.
    pub id: OutcomeId,
    /// Epoch seconds at which the outcome was withdrawn.
    pub removal_date: Option<i64>,
    /// Starting-price back price (the venue's near price).
    pub sp_back_price: f64,
    /// Back stake taken at the starting price.
    pub sp_back_size: f64,
    /// Starting-price lay price.
    pub sp_lay_price: f64,
    /// Lay liability taken at the starting price.
    pub sp_lay_size: f64,
    /// Size-weighted average traded back price.
    pub ex_average_back_price: f64,
    /// Total traded back stake.
    pub ex_back_size: f64,
    /// Liability-weighted average traded lay price.
    pub ex_average_lay_price: f64,
    /// Total traded volume in lay-liability units.
    pub ex_lay_size: f64,
    /// Best available back price.
    pub ex_offered_back_price: f64,
    /// Best available lay price.
    pub ex_offered_lay_price: f64,
}

impl OutcomeRecord {
    /// Create a record with every field at its default.
    #[must_use]
    pub fn empty(id: OutcomeId) -> Self {
        Self {
            id,
            removal_date: None,
            sp_back_price: f64::NAN,
            sp_back_size: 0.0,
            sp_lay_price: f64::NAN,
            sp_lay_size: 0.0,
            ex_average_back_price: f64::NAN,
            ex_back_size: 0.0,
            ex_average_lay_price: f64::NAN,
            ex_lay_size: 0.0,
            ex_offered_back_price: f64::NAN,
            ex_offered_lay_price: f64::NAN,
        }
    }

    /// Exchange plus starting-price back stake.
    #[must_use]
    pub fn combined_back_size(&self) -> f64 {
        self.ex_back_size + self.sp_back_size
    }

    /// Whether the outcome has been withdrawn from the market.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removal_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_defaults_sizes_to_zero_and_prices_to_nan() {
        let record = OutcomeRecord::empty(OutcomeId::new(1));
        assert_eq!(record.sp_back_size, 0.0);
        assert_eq!(record.ex_lay_size, 0.0);
        assert!(record.sp_back_price.is_nan());
        assert!(record.ex_offered_lay_price.is_nan());
        assert!(!record.is_removed());
    }

    #[test]
    fn combined_back_size_sums_exchange_and_sp() {
        let mut record = OutcomeRecord::empty(OutcomeId::new(1));
        record.ex_back_size = 1200.0;
        record.sp_back_size = 300.5;
        assert_eq!(record.combined_back_size(), 1500.5);
    }
}
