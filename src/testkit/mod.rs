//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Scripted [`MarketDataSource`](crate::port::outbound::market::MarketDataSource)
//!   and recording [`OrderSink`](crate::port::outbound::order::OrderSink) doubles.
//! - [`domain`] - Builders for polled market books and ids.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod source;
