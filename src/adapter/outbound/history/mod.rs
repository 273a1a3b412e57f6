//! Historical stream logs.

pub mod dto;
pub mod file;

pub use file::HistoricalLogFile;
