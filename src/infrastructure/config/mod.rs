//! Infrastructure configuration modules.

pub mod logging;
pub mod model;
pub mod risk;
pub mod settings;

pub use settings::Config;
