//! Application services (use cases).
//!
//! These services turn raw market data into ledger rows, ledger rows into
//! candidate signals, and signals into sized orders. The orchestrator ties
//! them together per market; the replay engine feeds it from recorded logs.

pub mod market;
pub mod model;
pub mod orchestration;
pub mod replay;
pub mod risk;
