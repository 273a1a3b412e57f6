//! Laybook - an exchange betting engine.
//!
//! Polls exchange markets in the minutes before they start, turns each poll
//! into normalized per-outcome records, keeps a per-market time series of
//! compositional (commission-aware, renormalized) probabilities, runs
//! trend and consensus rules over it, and sizes the resulting signals with
//! capped Kelly into limit orders. The same pipeline replays recorded
//! delta-stream logs offline.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Price arithmetic, normalized records, the columnar
//!   ledger, ladder state, orders and signals. Synchronous and I/O-free.
//! - **`port`** - Traits for market data, order submission, schedules and
//!   historical logs.
//! - **`application`** - Snapshot adaptation, the signal model, risk
//!   sizing, the per-market orchestrator and historical reconstruction.
//! - **`adapter`** - The venue JSON-RPC client, stream log files, paper
//!   trading, and the CLI.
//! - **`infrastructure`** - Configuration, logging and the async runtime.
//!
//! # Example
//!
//! ```no_run
//! use laybook::adapter::outbound::history::HistoricalLogFile;
//! use laybook::infrastructure::config::Config;
//! use laybook::infrastructure::runtime::run_replay;
//!
//! # async fn replay() -> laybook::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let mut log = HistoricalLogFile::open("1.2345.json.gz")?;
//! let summary = run_replay(
//!     &mut log,
//!     config.model_settings(),
//!     config.risk_settings(),
//!     config.commission(),
//! )
//! .await;
//! println!("{} orders, final state {}", summary.orders.len(), summary.final_state);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
