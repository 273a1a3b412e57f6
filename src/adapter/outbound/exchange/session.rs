//! Venue credentials and the authenticated session.

use std::fmt;

use crate::error::{ConfigError, Result};

/// Environment variable holding the application key.
pub const APP_KEY_VAR: &str = "LAYBOOK_APP_KEY";
/// Environment variable holding the account username.
pub const USERNAME_VAR: &str = "LAYBOOK_USERNAME";
/// Environment variable holding the account password.
pub const PASSWORD_VAR: &str = "LAYBOOK_PASSWORD";

/// Login credentials. Read from the environment, never from config files.
#[derive(Clone)]
pub struct Credentials {
    pub app_key: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read all three credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] naming the first unset variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            app_key: read_var(APP_KEY_VAR)?,
            username: read_var(USERNAME_VAR)?,
            password: read_var(PASSWORD_VAR)?,
        })
    }
}

fn read_var(field: &'static str) -> Result<String> {
    match std::env::var(field) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField { field }.into()),
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated session: the application key plus the token returned
/// by login. Sent as `X-Application` / `X-Authentication` on every call.
#[derive(Clone)]
pub struct Session {
    app_key: String,
    token: String,
}

impl Session {
    #[must_use]
    pub fn new(app_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            token: token.into(),
        }
    }

    #[must_use]
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("app_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let session = Session::new("key-123", "token-456");
        let printed = format!("{session:?}");
        assert!(!printed.contains("key-123"));
        assert!(!printed.contains("token-456"));
        assert_eq!(session.token(), "token-456");

        let credentials = Credentials {
            app_key: "key-123".into(),
            username: "punter".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("punter"));
        assert!(!printed.contains("hunter2"));
    }
}
