//! Venue connection configuration.

use serde::Deserialize;

/// Venue HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_http_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_http_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    5000
}

const fn default_http_connect_timeout_ms() -> u64 {
    2000
}

const fn default_http_retry_max_attempts() -> u32 {
    3
}

const fn default_http_retry_backoff_ms() -> u64 {
    250
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
            retry_max_attempts: default_http_retry_max_attempts(),
            retry_backoff_ms: default_http_retry_backoff_ms(),
        }
    }
}

/// Venue endpoints and market discovery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// JSON-RPC betting endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Login endpoint returning a session token.
    #[serde(default = "default_login_url")]
    pub login_url: String,
    /// Event type to trade (7 = horse racing).
    #[serde(default = "default_event_type_id")]
    pub event_type_id: String,
    /// Market countries passed to the catalogue filter.
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,
    /// Delay between polls of one market, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// How far ahead to look for upcoming markets, in minutes.
    #[serde(default = "default_lookahead_minutes")]
    pub lookahead_minutes: i64,
    /// Delay between schedule refreshes, in seconds.
    #[serde(default = "default_schedule_interval_secs")]
    pub schedule_interval_secs: u64,
    /// Upper bound on markets traded at once.
    #[serde(default = "default_max_concurrent_markets")]
    pub max_concurrent_markets: usize,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_api_url() -> String {
    "https://api.betfair.com/exchange/betting/json-rpc/v1".into()
}

fn default_login_url() -> String {
    "https://identitysso.betfair.com/api/login".into()
}

fn default_event_type_id() -> String {
    "7".into()
}

fn default_countries() -> Vec<String> {
    vec!["AU".into(), "GB".into(), "IE".into()]
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_lookahead_minutes() -> i64 {
    10
}

const fn default_schedule_interval_secs() -> u64 {
    60
}

const fn default_max_concurrent_markets() -> usize {
    8
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            login_url: default_login_url(),
            event_type_id: default_event_type_id(),
            countries: default_countries(),
            poll_interval_ms: default_poll_interval_ms(),
            lookahead_minutes: default_lookahead_minutes(),
            schedule_interval_secs: default_schedule_interval_secs(),
            max_concurrent_markets: default_max_concurrent_markets(),
            http: HttpConfig::default(),
        }
    }
}
