//! Async drivers around the synchronous trading core.
//!
//! - [`market`] - Poll one market until it closes, exhausts, or shuts down
//! - [`schedule`] - Discover upcoming markets and run one task per market
//! - [`replay`] - Run a recorded market through the same orchestrator offline

pub mod market;
pub mod replay;
pub mod schedule;

pub use market::run_market;
pub use replay::{run_replay, ReplaySummary};
pub use schedule::{run_schedule, MarketLauncher, MarketTask, ScheduleSettings, VenueLauncher};
