//! Signal generation.

pub mod features;
pub mod trend;
