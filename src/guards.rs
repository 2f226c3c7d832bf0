//! Authentication-gated navigation guard.
//!
//! The guard keeps the visible route consistent with the session. It is
//! evaluated on **every** change of auth status, route, or asset readiness,
//! not once at startup.
//!
//! | authenticated | route kind | action |
//! |---------------|------------|--------|
//! | no  | protected | redirect to login |
//! | yes | auth route | redirect to main entry |
//! | no  | auth route | continue |
//! | yes | protected | continue |
//!
//! While the auth store is loading or assets (fonts) are not ready, every
//! guard answers [`NavigationAction::Hold`] and the caller renders nothing.
//!
//! Guard checks are pure. [`NavigationGuard`] wraps one and performs the
//! replacing navigation, remembering the last redirect so that re-evaluating
//! unchanged inputs never issues it twice. Several guards combine into a
//! [`Guards`] set that runs them in priority order (higher first); the first
//! answer other than `Continue` wins.
//!
//! # Example
//!
//! ```
//! use ledger_navigator::{
//!     AuthGuard, AuthStatus, GuardContext, NavigatorConfig, RouteGuard, RouteLocation,
//! };
//!
//! let guard = AuthGuard::new(&NavigatorConfig::default());
//! let location = RouteLocation::from_path("/(tabs)");
//! let cx = GuardContext::new(AuthStatus::SIGNED_OUT, true, &location);
//!
//! assert_eq!(guard.check(&cx).redirect_path(), Some("/login"));
//! ```

use crate::auth::AuthStatus;
use crate::config::NavigatorConfig;
use crate::lifecycle::{lock, NavigationAction};
use crate::route::{RouteKind, RouteLocation};
use crate::state::Navigator;
use crate::{debug_log, info_log, trace_log};
use std::sync::Mutex;

// ============================================================================
// GuardContext
// ============================================================================

/// Inputs of one guard evaluation.
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    pub status: AuthStatus,
    /// Fonts and other assets have finished loading.
    pub assets_ready: bool,
    pub location: &'a RouteLocation,
}

impl<'a> GuardContext<'a> {
    pub fn new(status: AuthStatus, assets_ready: bool, location: &'a RouteLocation) -> Self {
        Self {
            status,
            assets_ready,
            location,
        }
    }

    /// Both the auth store and the assets have settled.
    pub fn is_ready(&self) -> bool {
        !self.status.is_loading && self.assets_ready
    }
}

// ============================================================================
// RouteGuard trait
// ============================================================================

/// A pure navigation decision.
///
/// Implementations must not navigate themselves; [`NavigationGuard`] does
/// that once per distinct decision.
pub trait RouteGuard: Send + Sync + 'static {
    fn check(&self, cx: &GuardContext<'_>) -> NavigationAction;

    /// Guard name for logs.
    fn name(&self) -> &'static str {
        "RouteGuard"
    }

    /// Position in a [`Guards`] set. Higher runs first.
    fn priority(&self) -> i32 {
        0
    }
}

/// Create a guard from a closure.
///
/// ```
/// use ledger_navigator::{guard_fn, NavigationAction};
///
/// let guard = guard_fn(|cx| {
///     if cx.is_ready() { NavigationAction::Continue } else { NavigationAction::Hold }
/// });
/// ```
pub const fn guard_fn<F>(f: F) -> FnGuard<F>
where
    F: Fn(&GuardContext<'_>) -> NavigationAction + Send + Sync + 'static,
{
    FnGuard { f, priority: 0 }
}

/// Guard created from a closure via [`guard_fn`].
pub struct FnGuard<F> {
    f: F,
    priority: i32,
}

impl<F> FnGuard<F> {
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl<F> RouteGuard for FnGuard<F>
where
    F: Fn(&GuardContext<'_>) -> NavigationAction + Send + Sync + 'static,
{
    fn check(&self, cx: &GuardContext<'_>) -> NavigationAction {
        (self.f)(cx)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

// ============================================================================
// AuthGuard
// ============================================================================

/// The auth-route decision table.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    login_path: String,
    main_path: String,
}

impl AuthGuard {
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            login_path: config.login_path.clone(),
            main_path: config.main_path.clone(),
        }
    }
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new(&NavigatorConfig::default())
    }
}

impl RouteGuard for AuthGuard {
    fn check(&self, cx: &GuardContext<'_>) -> NavigationAction {
        if !cx.is_ready() {
            return NavigationAction::Hold;
        }

        match (cx.status.is_authenticated, cx.location.kind()) {
            (false, RouteKind::Protected) => {
                NavigationAction::redirect_with_reason(&self.login_path, "Authentication required")
            }
            (true, RouteKind::Auth(screen)) => NavigationAction::redirect_with_reason(
                &self.main_path,
                format!("Already signed in ({})", screen.segment()),
            ),
            _ => NavigationAction::Continue,
        }
    }

    fn name(&self) -> &'static str {
        "AuthGuard"
    }

    fn priority(&self) -> i32 {
        100
    }
}

// ============================================================================
// Guards
// ============================================================================

/// Guards combined with AND logic, checked in priority order.
///
/// ```
/// use ledger_navigator::{guard_fn, AuthGuard, Guards, NavigationAction, RouteGuard};
///
/// let guards = Guards::new()
///     .with(guard_fn(|_| NavigationAction::Continue))
///     .with(AuthGuard::default());
/// assert_eq!(guards.len(), 2);
/// assert_eq!(guards.priority(), 100);
/// ```
#[derive(Default)]
pub struct Guards {
    /// Kept sorted, highest priority first.
    guards: Vec<Box<dyn RouteGuard>>,
}

impl Guards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a guard. Guards of equal priority keep insertion order.
    #[must_use]
    pub fn with(mut self, guard: impl RouteGuard) -> Self {
        self.guards.push(Box::new(guard));
        self.guards.sort_by_key(|g| std::cmp::Reverse(g.priority()));
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl RouteGuard for Guards {
    fn check(&self, cx: &GuardContext<'_>) -> NavigationAction {
        for guard in &self.guards {
            let action = guard.check(cx);
            trace_log!(
                "Guard '{}' (priority {}) -> {:?}",
                guard.name(),
                guard.priority(),
                action
            );
            if !action.is_continue() {
                return action;
            }
        }
        NavigationAction::Continue
    }

    fn name(&self) -> &'static str {
        "Guards"
    }

    fn priority(&self) -> i32 {
        self.guards.iter().map(|g| g.priority()).max().unwrap_or(0)
    }
}

// ============================================================================
// NavigationGuard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct IssuedRedirect {
    status: AuthStatus,
    location: RouteLocation,
    to: String,
}

/// Runs a [`RouteGuard`] and applies its redirects through a [`Navigator`].
pub struct NavigationGuard<G: RouteGuard = AuthGuard> {
    guard: G,
    last_redirect: Mutex<Option<IssuedRedirect>>,
}

impl NavigationGuard<AuthGuard> {
    /// Guard with the built-in auth decision table.
    pub fn with_config(config: &NavigatorConfig) -> Self {
        Self::new(AuthGuard::new(config))
    }
}

impl<G: RouteGuard> NavigationGuard<G> {
    pub fn new(guard: G) -> Self {
        Self {
            guard,
            last_redirect: Mutex::new(None),
        }
    }

    /// Pure evaluation, no navigation.
    pub fn evaluate(&self, cx: &GuardContext<'_>) -> NavigationAction {
        self.guard.check(cx)
    }

    /// Evaluate and, on a new redirect, perform a replacing navigation.
    ///
    /// Returns the decision. A redirect identical to the previous one (same
    /// status, same route, same target) is returned but not re-issued.
    pub fn run(&self, cx: &GuardContext<'_>, navigator: &dyn Navigator) -> NavigationAction {
        let action = self.evaluate(cx);
        let mut last = lock(&self.last_redirect);

        match &action {
            NavigationAction::Redirect { to, reason } => {
                let issued = IssuedRedirect {
                    status: cx.status,
                    location: cx.location.clone(),
                    to: to.clone(),
                };
                if last.as_ref() == Some(&issued) {
                    trace_log!(
                        "{}: redirect to '{}' already issued for '{}'",
                        self.guard.name(),
                        to,
                        cx.location
                    );
                } else {
                    info_log!(
                        "{}: '{}' -> '{}' ({})",
                        self.guard.name(),
                        cx.location,
                        to,
                        reason.as_deref().unwrap_or("no reason")
                    );
                    navigator.replace(to);
                    *last = Some(issued);
                }
            }
            NavigationAction::Hold => {
                debug_log!("{}: holding, inputs not ready", self.guard.name());
            }
            NavigationAction::Continue => {
                *last = None;
            }
        }

        action
    }
}

// ============================================================================
// Tests
// ============================================================================
