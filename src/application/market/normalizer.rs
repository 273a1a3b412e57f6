//! Flattening of raw outcome data into [`OutcomeRecord`]s.
//!
//! Two inputs share one set of rules: a runner from a polled market book,
//! and a runner state rebuilt from a historical delta stream. Every field
//! gets a default so downstream code never branches on absence.

use serde_json::Value;

use crate::domain::book::{parse_timestamp, RawPriceSize, RawRunner};
use crate::domain::id::OutcomeId;
use crate::domain::ladder::{Ladder, RunnerState};
use crate::domain::outcome::OutcomeRecord;
use crate::domain::price::{is_number, is_valid_price, lay_price};

/// Normalize one polled runner. Returns `None` when it carries no id.
#[must_use]
pub fn normalize_runner(runner: &RawRunner) -> Option<OutcomeRecord> {
    let id = OutcomeId::new(runner.selection_id?);
    let mut record = OutcomeRecord::empty(id);

    record.removal_date = runner
        .removal_date
        .as_deref()
        .and_then(parse_timestamp)
        .map(|t| t.timestamp());

    if let Some(sp) = &runner.sp {
        record.sp_back_price = near_price(sp.near_price.as_ref());
        record.sp_back_size = ladder(sp.back_stake_taken.as_deref()).total_size();
        record.sp_lay_size = ladder(sp.lay_liability_taken.as_deref()).total_size();
    }
    record.sp_lay_price = lay_price(record.sp_back_price);

    if let Some(ex) = &runner.ex {
        apply_traded(&mut record, &ladder(ex.traded_volume.as_deref()));
        record.ex_offered_back_price = first_price(ex.available_to_back.as_deref());
        record.ex_offered_lay_price = first_price(ex.available_to_lay.as_deref());
    }

    Some(record)
}

/// Normalize a reconstructed runner state.
#[must_use]
pub fn normalize_state(id: OutcomeId, state: &RunnerState) -> OutcomeRecord {
    let mut record = OutcomeRecord::empty(id);
    record.removal_date = state.removal_date;

    record.sp_back_price = state
        .sp
        .near_price
        .filter(|p| is_number(*p) && *p > 0.0)
        .unwrap_or(f64::NAN);
    record.sp_lay_price = lay_price(record.sp_back_price);
    record.sp_back_size = state.sp.back_stake_taken.total_size();
    record.sp_lay_size = state.sp.lay_liability_taken.total_size();

    apply_traded(&mut record, &state.traded);
    record.ex_offered_back_price = state.available_to_back.highest_price();
    record.ex_offered_lay_price = state.available_to_lay.lowest_price();
    record
}

fn apply_traded(record: &mut OutcomeRecord, traded: &Ladder) {
    record.ex_back_size = traded.total_size();
    record.ex_average_back_price = traded.weighted_average_price();
    record.ex_lay_size = traded.total_liability();
    record.ex_average_lay_price = traded.weighted_average_lay_price();
}

/// The near price counts only when it is a positive real number.
fn near_price(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|p| is_number(*p) && *p > 0.0)
        .unwrap_or(f64::NAN)
}

fn ladder(levels: Option<&[RawPriceSize]>) -> Ladder {
    levels
        .unwrap_or_default()
        .iter()
        .map(|level| (level.price, level.size))
        .collect()
}

fn first_price(levels: Option<&[RawPriceSize]>) -> f64 {
    levels
        .and_then(<[RawPriceSize]>::first)
        .map(|level| level.price)
        .filter(|p| is_valid_price(*p))
        .unwrap_or(f64::NAN)
}
