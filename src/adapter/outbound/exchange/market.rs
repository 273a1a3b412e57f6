//! Live market data from the venue.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};

use super::client::VenueClient;
use crate::domain::book::{MarketBook, MarketInfoPayload};
use crate::domain::id::MarketId;
use crate::port::outbound::market::{MarketDataSource, RawSnapshot};

/// Polls `listMarketBook` for one market and stamps each result with the
/// extract time and the market's official start.
pub struct VenueMarketSource {
    client: Arc<VenueClient>,
    start_time: DateTime<Utc>,
}

impl VenueMarketSource {
    #[must_use]
    pub const fn new(client: Arc<VenueClient>, start_time: DateTime<Utc>) -> Self {
        Self { client, start_time }
    }
}

#[async_trait]
impl MarketDataSource for VenueMarketSource {
    async fn fetch(&mut self, market_id: &MarketId) -> Option<RawSnapshot> {
        let extract_time = Utc::now();
        match self.client.list_market_book(market_id).await {
            Ok(Some(info)) => Some(RawSnapshot::Poll(MarketBook {
                extract_time: Some(extract_time.to_rfc3339_opts(SecondsFormat::Millis, true)),
                market_start_time: Some(self.start_time.to_rfc3339_opts(SecondsFormat::Secs, true)),
                market_info: Some(MarketInfoPayload::Single(info)),
            })),
            Ok(None) => {
                debug!(market_id = %market_id, "Empty market book");
                None
            }
            Err(err) => {
                warn!(market_id = %market_id, error = %err, "Market book fetch failed");
                None
            }
        }
    }
}
