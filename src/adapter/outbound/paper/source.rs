//! Replayed market data.

use async_trait::async_trait;

use crate::domain::id::MarketId;
use crate::domain::stream::ReconstructedSnapshot;
use crate::port::outbound::market::{MarketDataSource, RawSnapshot};

/// Serves reconstructed snapshots one per fetch, then `None` forever.
#[derive(Debug)]
pub struct ReplaySource {
    snapshots: std::vec::IntoIter<ReconstructedSnapshot>,
}

impl ReplaySource {
    #[must_use]
    pub fn new(snapshots: Vec<ReconstructedSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter(),
        }
    }

    /// Snapshots not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.snapshots.len()
    }
}

#[async_trait]
impl MarketDataSource for ReplaySource {
    async fn fetch(&mut self, _market_id: &MarketId) -> Option<RawSnapshot> {
        self.snapshots.next().map(RawSnapshot::Replay)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[tokio::test]
    async fn serves_each_snapshot_once() {
        let snapshot = |t| ReconstructedSnapshot {
            elapsed_seconds: t,
            closed: false,
            runners: BTreeMap::new(),
        };
        let mut source = ReplaySource::new(vec![snapshot(-2), snapshot(-1)]);
        let id = MarketId::new("1.1");

        assert!(matches!(
            source.fetch(&id).await,
            Some(RawSnapshot::Replay(s)) if s.elapsed_seconds == -2
        ));
        assert_eq!(source.remaining(), 1);
        assert!(source.fetch(&id).await.is_some());
        assert!(source.fetch(&id).await.is_none());
        assert!(source.fetch(&id).await.is_none());
    }
}
