//! Venue JSON-RPC client.
//!
//! One client holds one [`Session`] for its whole life. Every call is a
//! POST of a JSON-RPC envelope to the betting endpoint; transient transport
//! failures (timeouts, connection errors) are retried with a fixed backoff.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::{
    ListMarketBookParams, ListMarketCatalogueParams, LoginResponse, MarketBookResult,
    MarketCatalogue, MarketFilter, PlaceExecutionReport, PlaceInstruction, PlaceOrdersParams,
    RpcRequest, RpcResponse, TimeRange, LIST_MARKET_BOOK, LIST_MARKET_CATALOGUE, PLACE_ORDERS,
};
use super::session::{Credentials, Session};
use super::settings::{ExchangeConfig, HttpConfig};
use crate::domain::book::{parse_timestamp, MarketInfo};
use crate::domain::id::MarketId;
use crate::domain::order::{ExecutionReport, Order};
use crate::error::{ExecutionError, Result};
use crate::port::outbound::schedule::{MarketDescriptor, ScheduleSource};

const MAX_CATALOGUE_RESULTS: u32 = 1000;

/// HTTP client for the venue's JSON-RPC API.
pub struct VenueClient {
    http: HttpClient,
    api_url: Url,
    session: Session,
    countries: Vec<String>,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl VenueClient {
    /// Build a client around an existing session.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not a valid URL.
    pub fn with_session(config: &ExchangeConfig, session: Session) -> Result<Self> {
        Ok(Self {
            http: build_http(&config.http),
            api_url: Url::parse(&config.api_url)?,
            session,
            countries: config.countries.clone(),
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        })
    }

    /// Log in and build a client around the new session.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::AuthFailed`] if the venue does not hand out
    /// a session token, or a transport error if the login call fails.
    pub async fn login(config: &ExchangeConfig, credentials: &Credentials) -> Result<Self> {
        let http = build_http(&config.http);
        let login_url = Url::parse(&config.login_url)?;

        info!(url = %login_url, username = %credentials.username, "Logging in");
        let response: LoginResponse = http
            .post(login_url)
            .header("X-Application", &credentials.app_key)
            .header("Accept", "application/json")
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let token = match (response.token, response.status.as_deref()) {
            (Some(token), Some("SUCCESS") | None) if !token.is_empty() => token,
            (_, status) => {
                let reason = response
                    .error
                    .or_else(|| status.map(str::to_string))
                    .unwrap_or_else(|| "no session token".into());
                return Err(ExecutionError::AuthFailed(reason).into());
            }
        };
        info!("Session established");

        Self::with_session(config, Session::new(credentials.app_key.clone(), token))
    }

    /// The session this client authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Fetch the current book for one market.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a JSON-RPC error object.
    pub async fn list_market_book(&self, market_id: &MarketId) -> Result<Option<MarketInfo>> {
        let params = ListMarketBookParams::new(market_id.as_str());
        let books: MarketBookResult = self.call(LIST_MARKET_BOOK, &params).await?;
        Ok(books.into_iter().next())
    }

    /// List WIN markets of `event_type_id` starting before `before`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a JSON-RPC error object.
    pub async fn list_market_catalogue(
        &self,
        event_type_id: &str,
        before: DateTime<Utc>,
    ) -> Result<Vec<MarketCatalogue>> {
        let params = ListMarketCatalogueParams {
            filter: MarketFilter {
                event_type_ids: [event_type_id],
                market_type_codes: ["WIN"],
                market_countries: &self.countries,
                market_start_time: TimeRange {
                    to: before.to_rfc3339_opts(SecondsFormat::Secs, true),
                },
            },
            sort: "FIRST_TO_START",
            max_results: MAX_CATALOGUE_RESULTS,
            market_projection: vec!["MARKET_START_TIME", "EVENT"],
        };
        self.call(LIST_MARKET_CATALOGUE, &params).await
    }

    /// Place limit orders on one market.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::SubmissionFailed`] if the venue rejects the
    /// whole request, or a transport error.
    pub async fn place_orders(
        &self,
        market_id: &MarketId,
        orders: &[Order],
    ) -> Result<Vec<ExecutionReport>> {
        let params = PlaceOrdersParams {
            market_id: market_id.as_str(),
            instructions: orders.iter().map(PlaceInstruction::from).collect(),
        };
        let report: PlaceExecutionReport = self.call(PLACE_ORDERS, &params).await?;
        if report.instruction_reports.is_empty() {
            let reason = report
                .error_code
                .or(report.status)
                .unwrap_or_else(|| "no instruction reports".into());
            return Err(ExecutionError::SubmissionFailed(reason).into());
        }
        Ok(report
            .instruction_reports
            .iter()
            .filter_map(|r| r.to_execution_report())
            .collect())
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = RpcRequest::new(method, params);
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = self
                .http
                .post(self.api_url.clone())
                .header("X-Application", self.session.app_key())
                .header("X-Authentication", self.session.token())
                .json(&request)
                .send()
                .await;
            let response = match response {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(method, attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = response.error_for_status()?;
            let parsed: RpcResponse<T> = match response.json().await {
                Ok(parsed) => parsed,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(method, attempt, max_attempts, &err).await;
                    continue;
                }
            };

            if let Some(error) = parsed.error {
                return Err(ExecutionError::Venue(error.to_string()).into());
            }
            return parsed
                .result
                .ok_or_else(|| ExecutionError::Venue(format!("{method} returned no result")).into());
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, method: &str, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            method,
            attempt,
            max_attempts,
            error = %err,
            "Venue request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

fn build_http(config: &HttpConfig) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        })
}

#[async_trait]
impl ScheduleSource for VenueClient {
    async fn list_upcoming(
        &self,
        event_type_id: &str,
        before: DateTime<Utc>,
    ) -> Result<Vec<MarketDescriptor>> {
        let catalogue = self.list_market_catalogue(event_type_id, before).await?;
        let markets: Vec<_> = catalogue.into_iter().filter_map(descriptor).collect();
        debug!(count = markets.len(), "Fetched upcoming markets");
        Ok(markets)
    }
}

/// Catalogue entries without a parsable start time are skipped.
fn descriptor(entry: MarketCatalogue) -> Option<MarketDescriptor> {
    let start_time = entry.market_start_time.as_deref().and_then(parse_timestamp)?;
    Some(MarketDescriptor {
        id: MarketId::new(entry.market_id),
        start_time,
        country_code: entry.event.and_then(|event| event.country_code),
    })
}
