//! Per-market orchestration.
//!
//! One [`orchestrator::Orchestrator`] drives one market. Each tick is a
//! chain of [`event::Event`]s handled in a single control loop:
//!
//! 1. **Fetch**: ask the market data source for a raw snapshot
//! 2. **Ingest**: normalize it and append it to the ledger
//! 3. **Model**: turn the ledger into candidate signals
//! 4. **Size**: turn candidates into valid, risk-reduced orders
//! 5. **Submit**: send orders to the sink
//! 6. **Reconcile**: record executed orders and fix their probabilities
//!
//! The market closing, or ten consecutive ticks without usable data, ends
//! the orchestrator for good.

pub mod event;
pub mod orchestrator;
pub mod state;
