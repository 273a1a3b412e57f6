//! Order submission port.

use async_trait::async_trait;

use crate::domain::id::MarketId;
use crate::domain::order::{ExecutionReport, Order};

/// Destination for sized orders.
///
/// Returns one report per order it could match back to an outcome id.
/// Partial success is normal; orders missing from the reports are treated
/// as failed.
#[async_trait]
pub trait OrderSink: Send {
    /// Submit `orders` for `market_id`.
    async fn submit(&mut self, market_id: &MarketId, orders: &[Order]) -> Vec<ExecutionReport>;

    /// Name for logging.
    fn sink_name(&self) -> &'static str;
}
