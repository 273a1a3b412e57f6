//! Offline adapters: replayed market data and simulated fills.

pub mod sink;
pub mod source;

pub use sink::PaperOrderSink;
pub use source::ReplaySource;
