//! Outbound adapters (driven side).

pub mod exchange;
pub mod history;
pub mod paper;
