//! JSON-RPC envelopes and venue payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::book::MarketInfo;
use crate::domain::order::{ExecutionReport, Order, Side};

pub const LIST_MARKET_BOOK: &str = "SportsAPING/v1.0/listMarketBook";
pub const LIST_MARKET_CATALOGUE: &str = "SportsAPING/v1.0/listMarketCatalogue";
pub const PLACE_ORDERS: &str = "SportsAPING/v1.0/placeOrders";

/// JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: P,
    pub id: u32,
}

impl<'a, P> RpcRequest<'a, P> {
    pub const fn new(method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        }
    }
}

/// JSON-RPC 2.0 response. Exactly one of `result` / `error` is set.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<serde_json::Value>,
}

/// Login endpoint response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "sessionToken")]
    pub token: Option<String>,
    #[serde(alias = "loginStatus")]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceProjection {
    pub price_data: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMarketBookParams<'a> {
    pub market_ids: [&'a str; 1],
    pub price_projection: PriceProjection,
}

impl<'a> ListMarketBookParams<'a> {
    pub fn new(market_id: &'a str) -> Self {
        Self {
            market_ids: [market_id],
            price_projection: PriceProjection {
                price_data: vec!["EX_BEST_OFFERS", "SP_AVAILABLE", "SP_TRADED", "EX_TRADED"],
            },
        }
    }
}

/// `listMarketBook` returns one [`MarketInfo`] per requested id.
pub type MarketBookResult = Vec<MarketInfo>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub to: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFilter<'a> {
    pub event_type_ids: [&'a str; 1],
    pub market_type_codes: [&'static str; 1],
    pub market_countries: &'a [String],
    pub market_start_time: TimeRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMarketCatalogueParams<'a> {
    pub filter: MarketFilter<'a>,
    pub sort: &'static str,
    pub max_results: u32,
    pub market_projection: Vec<&'static str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCatalogue {
    pub market_id: String,
    #[serde(default)]
    pub market_start_time: Option<String>,
    #[serde(default)]
    pub event: Option<CatalogueEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEvent {
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrdersParams<'a> {
    pub market_id: &'a str,
    pub instructions: Vec<PlaceInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInstruction {
    pub selection_id: u64,
    pub handicap: u8,
    pub side: &'static str,
    pub order_type: &'static str,
    pub limit_order: LimitOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    pub size: Decimal,
    pub price: f64,
    pub persistence_type: &'static str,
}

impl From<&Order> for PlaceInstruction {
    fn from(order: &Order) -> Self {
        Self {
            selection_id: order.id().value(),
            handicap: 0,
            side: match order.side() {
                Side::Buy => "BACK",
                Side::Sell => "LAY",
            },
            order_type: "LIMIT",
            limit_order: LimitOrder {
                size: order.size().round_dp(2),
                price: order.reference_price(),
                persistence_type: "LAPSE",
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceExecutionReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub instruction_reports: Vec<InstructionReport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub instruction: Option<InstructionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionRef {
    pub selection_id: u64,
}

impl InstructionReport {
    /// Convert to an execution report. Reports without an instruction cannot
    /// be matched to an outcome and are dropped.
    #[must_use]
    pub fn to_execution_report(&self) -> Option<ExecutionReport> {
        let id = self.instruction.as_ref()?.selection_id.into();
        Some(if self.status.as_deref() == Some("SUCCESS") {
            ExecutionReport::success(id)
        } else {
            ExecutionReport::failure(id)
        })
    }
}
