//! Exchange-agnostic domain logic.
//!
//! Everything here is synchronous and free of I/O: price arithmetic,
//! normalized market records, the columnar ledger, ladder reconstruction
//! state, and the order/signal types that flow between pipeline stages.

pub mod book;
pub mod error;
pub mod id;
pub mod ladder;
pub mod ledger;
pub mod order;
pub mod outcome;
pub mod price;
pub mod probability;
pub mod regression;
pub mod signal;
pub mod snapshot;
pub mod stream;
