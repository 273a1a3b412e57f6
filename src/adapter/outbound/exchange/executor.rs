//! Order submission to the venue.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::client::VenueClient;
use crate::domain::id::MarketId;
use crate::domain::order::{ExecutionReport, Order};
use crate::port::outbound::order::OrderSink;

/// Places orders through `placeOrders`. Invalid orders are never sent and
/// come back as failures, as does every order of a failed request.
pub struct VenueOrderSink {
    client: Arc<VenueClient>,
}

impl VenueOrderSink {
    #[must_use]
    pub const fn new(client: Arc<VenueClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderSink for VenueOrderSink {
    async fn submit(&mut self, market_id: &MarketId, orders: &[Order]) -> Vec<ExecutionReport> {
        let (valid, invalid): (Vec<Order>, Vec<Order>) =
            orders.iter().cloned().partition(Order::is_valid);
        let mut reports: Vec<ExecutionReport> = invalid
            .iter()
            .map(|order| {
                debug!(outcome_id = %order.id(), "Invalid order not submitted");
                ExecutionReport::failure(order.id())
            })
            .collect();
        if valid.is_empty() {
            return reports;
        }

        match self.client.place_orders(market_id, &valid).await {
            Ok(placed) => reports.extend(placed),
            Err(err) => {
                warn!(market_id = %market_id, error = %err, "Order submission failed");
                reports.extend(valid.iter().map(|order| ExecutionReport::failure(order.id())));
            }
        }
        reports
    }

    fn sink_name(&self) -> &'static str {
        "venue"
    }
}
