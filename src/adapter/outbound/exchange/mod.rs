//! Venue integration: session login, JSON-RPC calls, live market data,
//! order placement and market discovery.

pub mod client;
pub mod dto;
pub mod executor;
pub mod market;
pub mod session;
pub mod settings;

pub use client::VenueClient;
pub use executor::VenueOrderSink;
pub use market::VenueMarketSource;
pub use session::{Credentials, Session};
pub use settings::ExchangeConfig;
