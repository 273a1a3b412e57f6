//! Market data port.

use async_trait::async_trait;

use crate::domain::book::MarketBook;
use crate::domain::id::MarketId;
use crate::domain::stream::ReconstructedSnapshot;

/// One raw tick of market data, before normalization.
#[derive(Debug, Clone)]
pub enum RawSnapshot {
    /// A live poll of the venue's market book.
    Poll(MarketBook),
    /// A snapshot rebuilt from a historical delta stream.
    Replay(ReconstructedSnapshot),
}

/// Source of per-tick market data for one market.
///
/// `fetch` returns `None` whenever no data could be obtained: transport
/// errors, an exhausted replay, an empty response. The caller counts these
/// as unusable ticks and never sees the underlying error.
#[async_trait]
pub trait MarketDataSource: Send {
    /// Fetch the next raw snapshot for `market_id`.
    async fn fetch(&mut self, market_id: &MarketId) -> Option<RawSnapshot>;
}
