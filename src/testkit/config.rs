//! Canonical test configurations.
//!
//! Single source of truth for config used across tests.

use crate::infrastructure::config::Config;

/// The smallest valid configuration file.
pub const MINIMAL_TOML: &str = r#"
[logging]
level = "info"
format = "pretty"
"#;

/// [`MINIMAL_TOML`] parsed, with every section at its defaults.
pub fn minimal() -> Config {
    match Config::parse_toml(MINIMAL_TOML) {
        Ok(config) => config,
        Err(err) => panic!("minimal test config must parse: {err}"),
    }
}
