//! Simulated order execution.

use async_trait::async_trait;
use tracing::info;

use crate::domain::id::MarketId;
use crate::domain::order::{ExecutionReport, Order};
use crate::port::outbound::order::OrderSink;

/// Fills every valid order in full and rejects the rest. Used for replays
/// and `dry_run`.
#[derive(Debug, Default)]
pub struct PaperOrderSink {
    filled: Vec<Order>,
}

impl PaperOrderSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every order filled so far.
    #[must_use]
    pub fn filled(&self) -> &[Order] {
        &self.filled
    }
}

#[async_trait]
impl OrderSink for PaperOrderSink {
    async fn submit(&mut self, market_id: &MarketId, orders: &[Order]) -> Vec<ExecutionReport> {
        orders
            .iter()
            .map(|order| {
                if order.is_valid() {
                    info!(
                        market_id = %market_id,
                        outcome_id = %order.id(),
                        side = %order.side(),
                        size = %order.size(),
                        price = order.reference_price(),
                        "Paper fill"
                    );
                    self.filled.push(order.clone());
                    ExecutionReport::success(order.id())
                } else {
                    ExecutionReport::failure(order.id())
                }
            })
            .collect()
    }

    fn sink_name(&self) -> &'static str {
        "paper"
    }
}
