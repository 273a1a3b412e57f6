//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! - [`market::MarketDataSource`] - Per-tick raw market data
//! - [`order::OrderSink`] - Order submission with per-order reports
//! - [`history::HistoricalLogSource`] - Recorded delta streams for replay
//! - [`schedule::ScheduleSource`] - Upcoming market discovery

pub mod history;
pub mod market;
pub mod order;
pub mod schedule;
