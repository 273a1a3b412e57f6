//! Market schedule port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::id::MarketId;
use crate::error::Result;

/// A market about to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketDescriptor {
    /// Market id.
    pub id: MarketId,
    /// Official start time.
    pub start_time: DateTime<Utc>,
    /// Venue country code, e.g. `GB`.
    pub country_code: Option<String>,
}

/// Discovers upcoming markets. Used only to create new orchestrators.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Markets of `event_type_id` starting before `before`, soonest first.
    async fn list_upcoming(
        &self,
        event_type_id: &str,
        before: DateTime<Utc>,
    ) -> Result<Vec<MarketDescriptor>>;
}
