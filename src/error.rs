//! Error types.
//!
//! Nothing in this crate surfaces an error to the user. Failures are logged
//! and degrade to "do nothing" or to the safe default screen (login):
//!
//! - [`StorageError`]: the persistent key-value collaborator failed, or the
//!   pending deep-link slot holds something that is not a payload.
//! - [`AuthError`]: the auth store could not initialise its session.
//! - [`ConfigError`]: a [`NavigatorConfig`](crate::NavigatorConfig) could
//!   not be parsed or is inconsistent.
//!
//! [`Error`] aggregates them for callers that want a single type.
//!
//! # Examples
//!
//! ```
//! use ledger_navigator::error::StorageError;
//!
//! let err = StorageError::backend("disk full");
//! assert_eq!(err.to_string(), "storage backend failed: disk full");
//! ```

use thiserror::Error;

/// Failure of the persistent storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the operation.
    #[error("storage backend failed: {message}")]
    Backend { message: String },

    /// The stored value could not be decoded.
    #[error("corrupt value under '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A payload could not be encoded for storage.
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Shorthand for [`StorageError::Backend`].
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Failure of the auth store bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Stored credentials could not be refreshed.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    /// The backend could not be reached.
    #[error("auth backend unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid navigator config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("'{field}' must be an absolute path, got '{value}'")]
    RelativePath { field: &'static str, value: String },

    #[error("login path '{0}' is not an auth screen")]
    LoginNotAuthRoute(String),

    #[error("main path '{0}' must not be an auth screen")]
    MainIsAuthRoute(String),

    #[error("pending deep-link key must not be empty")]
    EmptyPendingKey,
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
