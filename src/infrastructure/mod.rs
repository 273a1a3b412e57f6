//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! trading logic: configuration loading, logging setup, and the async
//! runtime that drives orchestrators.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`runtime`] - Market polling, schedule discovery and offline replay

pub mod config;
pub mod runtime;
