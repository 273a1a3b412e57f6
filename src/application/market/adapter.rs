//! Raw tick → [`MarketSnapshot`].

use tracing::debug;

use super::normalizer::{normalize_runner, normalize_state};
use crate::domain::book::{parse_timestamp, MarketBook};
use crate::domain::snapshot::MarketSnapshot;
use crate::domain::stream::ReconstructedSnapshot;
use crate::port::outbound::market::RawSnapshot;

/// Turns raw polls or reconstructed snapshots into [`MarketSnapshot`]s.
///
/// Holds the market's closed flag so it can be carried forward across ticks
/// that do not report one; once closed, every later snapshot is closed.
#[derive(Debug, Clone, Default)]
pub struct SnapshotAdapter {
    closed: bool,
}

impl SnapshotAdapter {
    /// Create an adapter for a market that has not closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a closed indicator has been seen.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Adapt one raw tick. `None` means "no signal this tick".
    pub fn adapt(&mut self, raw: &RawSnapshot) -> Option<MarketSnapshot> {
        match raw {
            RawSnapshot::Poll(book) => self.adapt_book(book),
            RawSnapshot::Replay(snapshot) => self.adapt_reconstructed(snapshot),
        }
    }

    fn adapt_book(&mut self, book: &MarketBook) -> Option<MarketSnapshot> {
        let Some(info) = book.info() else {
            debug!("Market book has no market info");
            return None;
        };
        let Some(runners) = info.runners.as_ref() else {
            debug!("Market info has no runner list");
            return None;
        };

        let extract = book.extract_time.as_deref().and_then(parse_timestamp);
        let start = book.market_start_time.as_deref().and_then(parse_timestamp);
        let (Some(extract), Some(start)) = (extract, start) else {
            debug!(
                extract_time = ?book.extract_time,
                market_start_time = ?book.market_start_time,
                "Unparsable market book timestamps"
            );
            return None;
        };

        let outcomes: Vec<_> = runners.iter().filter_map(normalize_runner).collect();
        if outcomes.is_empty() {
            debug!("No outcome survived normalization");
            return None;
        }

        if let Some(closed) = info.closed_indicator() {
            self.closed |= closed;
        }

        Some(MarketSnapshot::new(
            extract.timestamp() - start.timestamp(),
            self.closed,
            outcomes,
        ))
    }

    fn adapt_reconstructed(&mut self, snapshot: &ReconstructedSnapshot) -> Option<MarketSnapshot> {
        let outcomes: Vec<_> = snapshot
            .runners
            .iter()
            .map(|(id, state)| normalize_state(*id, state))
            .collect();
        if outcomes.is_empty() {
            return None;
        }

        self.closed |= snapshot.closed;
        Some(MarketSnapshot::new(
            snapshot.elapsed_seconds,
            self.closed,
            outcomes,
        ))
    }
}
