//! Authentication status and the auth store collaborator.

use crate::error::AuthError;
use crate::lifecycle::lock;
use async_trait::async_trait;
use std::sync::Mutex;

/// Snapshot of the auth store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthStatus {
    /// Session restore still in progress.
    pub const LOADING: Self = Self {
        is_authenticated: false,
        is_loading: true,
    };

    /// Settled, no session.
    pub const SIGNED_OUT: Self = Self {
        is_authenticated: false,
        is_loading: false,
    };

    /// Settled, valid session.
    pub const SIGNED_IN: Self = Self {
        is_authenticated: true,
        is_loading: false,
    };
}

/// The external auth store.
///
/// Implementations own token storage and refresh; the navigation core only
/// reads [`status`](AuthStore::status) and calls
/// [`initialize`](AuthStore::initialize) once per process.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Current status snapshot.
    fn status(&self) -> AuthStatus;

    /// Restore the session (read stored tokens, refresh if needed).
    async fn initialize(&self) -> Result<(), AuthError>;
}

/// Auth store with a settable status.
///
/// Used by tests and by hosts that drive auth state from elsewhere.
#[derive(Debug)]
pub struct StaticAuthStore {
    status: Mutex<AuthStatus>,
    init_result: Mutex<Option<AuthError>>,
}

impl StaticAuthStore {
    pub fn new(status: AuthStatus) -> Self {
        Self {
            status: Mutex::new(status),
            init_result: Mutex::new(None),
        }
    }

    /// Make the next [`initialize`](AuthStore::initialize) call fail.
    #[must_use]
    pub fn failing_with(self, error: AuthError) -> Self {
        *lock(&self.init_result) = Some(error);
        self
    }

    pub fn set_status(&self, status: AuthStatus) {
        *lock(&self.status) = status;
    }
}

#[async_trait]
impl AuthStore for StaticAuthStore {
    fn status(&self) -> AuthStatus {
        *lock(&self.status)
    }

    async fn initialize(&self) -> Result<(), AuthError> {
        match lock(&self.init_result).take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(AuthStatus::LOADING.is_loading);
        assert!(!AuthStatus::SIGNED_OUT.is_authenticated);
        assert!(AuthStatus::SIGNED_IN.is_authenticated);
        assert_eq!(AuthStatus::default(), AuthStatus::SIGNED_OUT);
    }

    #[test]
    fn test_static_store_status() {
        let store = StaticAuthStore::new(AuthStatus::LOADING);
        assert_eq!(store.status(), AuthStatus::LOADING);
        store.set_status(AuthStatus::SIGNED_IN);
        assert_eq!(store.status(), AuthStatus::SIGNED_IN);
    }

    #[test]
    fn test_failing_initialize_fails_once() {
        let store = StaticAuthStore::new(AuthStatus::SIGNED_OUT)
            .failing_with(AuthError::RefreshFailed("expired".into()));
        assert!(pollster::block_on(store.initialize()).is_err());
        assert!(pollster::block_on(store.initialize()).is_ok());
    }
}
