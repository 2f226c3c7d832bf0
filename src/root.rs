//! Root layout orchestration.
//!
//! [`RootLayout`] is what the app's root screen owns. It bootstraps the auth
//! store once, runs the [`NavigationGuard`] on every state change, and opens
//! the notification router for navigation once the guard has settled on a
//! signed-in route. A deferred deep link is therefore never replayed before
//! the session has been checked, and a signed-out user keeps it queued until
//! they sign in.
//!
//! # Usage
//!
//! ```ignore
//! let root = RootLayout::new(auth, navigator, store, &NavigatorConfig::default())?;
//! root.mount().await;
//!
//! // whenever auth status, the route, or font loading changes:
//! if root.on_state_change() == Render::Content {
//!     root.replay_pending().await;
//! }
//!
//! root.listen(transport.subscribe()).await;
//! root.unmount();
//! ```

use crate::auth::{AuthStatus, AuthStore};
use crate::config::NavigatorConfig;
use crate::deep_link::DeepLinkResolver;
use crate::error::ConfigError;
use crate::guards::{GuardContext, NavigationGuard};
use crate::lifecycle::{Liveness, NavigationAction};
use crate::notification::{NotificationEvent, NotificationTransport, Subscription};
use crate::router::{Disposition, NotificationRouter, ReplayOutcome};
use crate::state::Navigator;
use crate::storage::KeyValueStore;
use crate::{error_log, info_log};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the root should render after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Inputs still loading; render nothing rather than partial UI.
    Blank,
    /// Render the current route.
    Content,
}

/// Owner of the guard and the notification router for one app mount.
pub struct RootLayout {
    auth: Arc<dyn AuthStore>,
    navigator: Arc<dyn Navigator>,
    guard: NavigationGuard,
    notifications: NotificationRouter,
    assets_ready: AtomicBool,
    auth_failed: AtomicBool,
    initialized: AtomicBool,
    liveness: Liveness,
}

impl RootLayout {
    /// Wire a root over its collaborators. Fails on an inconsistent config.
    pub fn new(
        auth: Arc<dyn AuthStore>,
        navigator: Arc<dyn Navigator>,
        store: Arc<dyn KeyValueStore>,
        config: &NavigatorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let liveness = Liveness::new();
        let notifications = NotificationRouter::new(navigator.clone(), store, config)
            .with_liveness(liveness.clone());
        Ok(Self {
            auth,
            navigator,
            guard: NavigationGuard::with_config(config),
            notifications,
            assets_ready: AtomicBool::new(false),
            auth_failed: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            liveness,
        })
    }

    /// Replace the notification router's deep-link resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl DeepLinkResolver + 'static) -> Self {
        self.notifications = self.notifications.with_resolver(resolver);
        self
    }

    /// Initialise the auth store. Only the first call does anything.
    ///
    /// A failed initialisation is logged and the session is treated as
    /// signed out, which sends the user to login.
    pub async fn mount(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.auth.initialize().await {
            Ok(()) => {
                info_log!("Auth store initialised");
            }
            Err(err) => {
                error_log!("Auth initialisation failed, continuing signed out: {}", err);
                self.auth_failed.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Report whether fonts and other assets have loaded.
    pub fn set_assets_ready(&self, ready: bool) {
        self.assets_ready.store(ready, Ordering::SeqCst);
    }

    /// Status the guard sees.
    pub fn status(&self) -> AuthStatus {
        let status = self.auth.status();
        if self.auth_failed.load(Ordering::SeqCst) {
            AuthStatus {
                is_authenticated: status.is_authenticated,
                is_loading: false,
            }
        } else {
            status
        }
    }

    /// Re-run the guard. Call on every auth, route, or readiness change.
    ///
    /// Deep links open only once the guard lets a signed-in route stand.
    /// While signed out they stay queued, since every target is protected.
    pub fn on_state_change(&self) -> Render {
        if !self.liveness.is_alive() {
            return Render::Blank;
        }

        let location = self.navigator.location();
        let status = self.status();
        let cx = GuardContext::new(status, self.assets_ready.load(Ordering::SeqCst), &location);

        match self.guard.run(&cx, self.navigator.as_ref()) {
            NavigationAction::Hold => Render::Blank,
            NavigationAction::Continue => {
                self.notifications.set_ready(status.is_authenticated);
                Render::Content
            }
            NavigationAction::Redirect { .. } => {
                if !status.is_authenticated {
                    self.notifications.set_ready(false);
                }
                Render::Content
            }
        }
    }

    /// Replay the deferred deep link. Does nothing until the guard has
    /// settled on a signed-in route.
    pub async fn replay_pending(&self) -> ReplayOutcome {
        self.notifications.replay_pending().await
    }

    /// Handle the notification the app was launched from, if any.
    pub async fn handle_launch(&self, transport: &dyn NotificationTransport) -> Option<Disposition> {
        let payload = transport.take_launch_notification().await?;
        Some(
            self.notifications
                .handle_event(&NotificationEvent::launched(payload))
                .await,
        )
    }

    /// Forward one event to the notification router.
    pub async fn dispatch(&self, event: &NotificationEvent) -> Disposition {
        self.notifications.handle_event(event).await
    }

    /// Process events until the subscription closes or the root unmounts.
    pub async fn listen(&self, subscription: Subscription) -> usize {
        self.notifications.listen(subscription).await
    }

    pub fn notifications(&self) -> &NotificationRouter {
        &self.notifications
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Stop all navigation from this root. Pending work becomes a no-op and
    /// a running [`listen`](Self::listen) returns, dropping its subscription.
    pub fn unmount(&self) {
        info_log!("Root layout unmounted");
        self.liveness.release();
    }
}
