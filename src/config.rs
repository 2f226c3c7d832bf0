//! Navigator configuration.
//!
//! Paths and timings used by the guard and the notification router. The
//! defaults match the ledger client's route layout:
//!
//! | Field | Default |
//! |-------|---------|
//! | `login_path` | `/login` |
//! | `main_path` | `/(tabs)` |
//! | `pending_key` | `pendingDeepLink` |
//! | `settling_delay_ms` | `1000` |
//!
//! # Example
//!
//! ```
//! use ledger_navigator::NavigatorConfig;
//!
//! let config = NavigatorConfig::from_json(r#"{ "main_path": "/home" }"#).unwrap();
//! assert_eq!(config.main_path, "/home");
//! assert_eq!(config.login_path, "/login");
//! ```

use crate::error::ConfigError;
use crate::route::RouteLocation;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default login screen path.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default main application entry path.
pub const DEFAULT_MAIN_PATH: &str = "/(tabs)";

/// Default storage key of the single pending deep-link slot.
pub const DEFAULT_PENDING_KEY: &str = "pendingDeepLink";

/// Default settling delay before a deferred deep link is replayed.
pub const DEFAULT_SETTLING_DELAY_MS: u64 = 1000;

/// Configuration shared by [`AuthGuard`](crate::AuthGuard) and
/// [`NotificationRouter`](crate::NotificationRouter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Where unauthenticated users are sent.
    pub login_path: String,
    /// Where authenticated users are sent when they land on an auth screen.
    pub main_path: String,
    /// Storage key of the pending deep-link slot.
    pub pending_key: String,
    /// Pause before replaying a deferred deep link, in milliseconds.
    pub settling_delay_ms: u64,
}

impl NavigatorConfig {
    /// Create a config with the default paths.
    pub fn new() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            main_path: DEFAULT_MAIN_PATH.to_string(),
            pending_key: DEFAULT_PENDING_KEY.to_string(),
            settling_delay_ms: DEFAULT_SETTLING_DELAY_MS,
        }
    }

    /// Parse a JSON config; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the login path.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the main entry path.
    #[must_use]
    pub fn main_path(mut self, path: impl Into<String>) -> Self {
        self.main_path = path.into();
        self
    }

    /// Set the pending deep-link storage key.
    #[must_use]
    pub fn pending_key(mut self, key: impl Into<String>) -> Self {
        self.pending_key = key.into();
        self
    }

    /// Set the settling delay.
    #[must_use]
    pub fn settling_delay(mut self, delay: Duration) -> Self {
        self.settling_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Settling delay as a [`Duration`].
    pub fn settling_delay_duration(&self) -> Duration {
        Duration::from_millis(self.settling_delay_ms)
    }

    /// Check that paths are absolute, that login is an auth screen and the
    /// main entry is not (either mistake makes the guard redirect in
    /// circles), and that the slot key is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("login_path", &self.login_path),
            ("main_path", &self.main_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::RelativePath {
                    field,
                    value: value.clone(),
                });
            }
        }
        if !RouteLocation::from_path(&self.login_path).kind().is_auth() {
            return Err(ConfigError::LoginNotAuthRoute(self.login_path.clone()));
        }
        if RouteLocation::from_path(&self.main_path).kind().is_auth() {
            return Err(ConfigError::MainIsAuthRoute(self.main_path.clone()));
        }
        if self.pending_key.trim().is_empty() {
            return Err(ConfigError::EmptyPendingKey);
        }
        Ok(())
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavigatorConfig::default();
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.main_path, "/(tabs)");
        assert_eq!(config.pending_key, "pendingDeepLink");
        assert_eq!(config.settling_delay_duration(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            NavigatorConfig::from_json(r#"{ "settling_delay_ms": 250, "pending_key": "dl" }"#)
                .unwrap();
        assert_eq!(config.settling_delay_ms, 250);
        assert_eq!(config.pending_key, "dl");
        assert_eq!(config.login_path, DEFAULT_LOGIN_PATH);
    }

    #[test]
    fn test_from_json_rejects_relative_path() {
        let err = NavigatorConfig::from_json(r#"{ "login_path": "login" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RelativePath {
                field: "login_path",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_circular_paths() {
        let err = NavigatorConfig::new().login_path("/welcome").validate().unwrap_err();
        assert!(matches!(err, ConfigError::LoginNotAuthRoute(_)));

        let err = NavigatorConfig::new().main_path("/login").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MainIsAuthRoute(_)));
    }

    #[test]
    fn test_from_json_rejects_empty_key() {
        let err = NavigatorConfig::from_json(r#"{ "pending_key": "  " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPendingKey));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            NavigatorConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_builder_setters() {
        let config = NavigatorConfig::new()
            .login_path("/signup")
            .main_path("/home")
            .settling_delay(Duration::from_millis(10));
        assert!(config.validate().is_ok());
        assert_eq!(config.login_path, "/signup");
        assert_eq!(config.main_path, "/home");
        assert_eq!(config.settling_delay_ms, 10);
    }
}
