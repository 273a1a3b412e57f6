//! Events passed between pipeline stages within one tick.

use crate::domain::order::{ExecutionReport, Order};
use crate::domain::signal::CandidateSignal;
use crate::port::outbound::market::RawSnapshot;

/// One step of a tick. Each variant has exactly one handler.
#[derive(Debug, Clone)]
pub enum Event {
    /// Raw data arrived (or did not).
    MarketDataFetched(Option<RawSnapshot>),
    /// A usable snapshot is in the ledger.
    DataIngested,
    /// The model produced at least one candidate.
    SignalsProduced(Vec<CandidateSignal>),
    /// Candidates were sized into valid orders.
    OrdersSized(Vec<Order>),
    /// The sink reported on submitted orders.
    OrdersSubmitted {
        /// Orders that were submitted.
        orders: Vec<Order>,
        /// The sink's reports.
        reports: Vec<ExecutionReport>,
    },
    /// The tick is finished.
    NothingToDo,
}

impl Event {
    /// Stable name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarketDataFetched(_) => "market_data_fetched",
            Self::DataIngested => "data_ingested",
            Self::SignalsProduced(_) => "signals_produced",
            Self::OrdersSized(_) => "orders_sized",
            Self::OrdersSubmitted { .. } => "orders_submitted",
            Self::NothingToDo => "nothing_to_do",
        }
    }
}
