//! Navigation actions and mount lifecycle.
//!
//! This module defines two small abstractions shared by the guard and the
//! notification router:
//!
//! - [`NavigationAction`]: what a guard wants the root layout to do:
//!   continue rendering, hold (render nothing yet), or redirect.
//! - [`Liveness`]: a cloneable flag that is set while the owning root is
//!   mounted. Work that completes after unmount (a storage read, the
//!   settling delay) checks it before navigating, and long waits can race
//!   against [`Liveness::released`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// NavigationAction
// ============================================================================

/// Result of a guard check.
///
/// # Example
///
/// ```
/// use ledger_navigator::NavigationAction;
///
/// let action = NavigationAction::redirect("/login");
/// assert_eq!(action.redirect_path(), Some("/login"));
/// assert!(NavigationAction::Hold.is_hold());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// The current route is consistent with the session.
    Continue,

    /// Inputs are still loading; render nothing and decide nothing.
    Hold,

    /// Replace the current route.
    Redirect {
        /// Path to redirect to.
        to: String,
        /// Optional human-readable reason for redirecting.
        reason: Option<String>,
    },
}

impl NavigationAction {
    /// Create a redirect action.
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: None,
        }
    }

    /// Create a redirect action with a human-readable reason.
    pub fn redirect_with_reason(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            reason: Some(reason.into()),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    /// Get the redirect path, if this is a redirect action.
    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// Liveness
// ============================================================================

/// Mounted/unmounted flag shared between an owner and its pending work.
///
/// Clones observe the same flag. A freshly created `Liveness` is alive.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<watch::Sender<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        let (alive, _) = watch::channel(true);
        Self {
            alive: Arc::new(alive),
        }
    }

    pub fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }

    /// Mark the owner as gone and wake every [`released`](Self::released)
    /// waiter. Idempotent.
    pub fn release(&self) {
        self.alive.send_replace(false);
    }

    /// Resolves once the owner is released, immediately if it already is.
    pub async fn released(&self) {
        let mut alive = self.alive.subscribe();
        loop {
            if !*alive.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only fails on teardown.
            if alive.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
