//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - The command-line interface
//! - [`outbound`] - Venue client, historical log files, paper trading

pub mod inbound;
pub mod outbound;
