//! Order sizing under a bankroll-risk constraint.

pub mod engine;
pub mod kelly;
