//! Market data ingestion: normalization, snapshot adaptation, ledger rows.

pub mod adapter;
pub mod data;
pub mod normalizer;
pub mod transform;
