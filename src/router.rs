//! Notification-driven deep-link router.
//!
//! Turns notification events into navigation, at most one per event:
//!
//! - `Received` (foreground) is logged and ignored. Navigating while the user
//!   is in the middle of something would be surprising.
//! - `Opened` / `AppLaunchedFrom` resolve the payload and push the target.
//!   Before the app is ready the payload is written to the single
//!   `pendingDeepLink` slot instead (last write wins).
//! - [`replay_pending`](NotificationRouter::replay_pending) replays the
//!   queued payload once, after a settling delay, then clears the slot.
//!
//! Per payload:
//!
//! ```text
//! Received ──► Ignored
//! Opened/LaunchedFrom ──► Resolved ──► Navigated
//!                     │            └─► Queued ──► Replayed ──► Cleared
//!                     └─► Discarded (empty / unrecognized)
//! ```
//!
//! Events are handled one at a time, in delivery order. After
//! [`release`](NotificationRouter::release) nothing navigates, including a
//! replay whose settling delay was already running.

use crate::config::NavigatorConfig;
use crate::deep_link::{DeepLinkResolver, DiscardReason, Resolution, ScreenResolver};
use crate::error::StorageError;
use crate::lifecycle::Liveness;
use crate::notification::{EventKind, NotificationEvent, NotificationPayload, Subscription};
use crate::state::Navigator;
use crate::storage::{KeyValueStore, PendingDeepLinkSlot};
use crate::{debug_log, info_log, trace_log, warn_log};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Foreground receipt; logged only.
    Ignored,
    /// Written to the pending slot for replay.
    Queued,
    /// Navigated to the given path.
    Navigated(String),
    /// Produced no navigation.
    Discarded(DiscardReason),
    /// The app was not ready and the payload could not be persisted.
    Dropped,
}

/// Outcome of [`NotificationRouter::replay_pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The slot was empty (or unreadable).
    NothingQueued,
    /// Navigated to the given path and cleared the slot.
    Replayed(String),
    /// The queued payload resolved to nothing; the slot was cleared.
    Discarded(DiscardReason),
    /// The owner was released during the settling delay; slot left as is.
    Deferred,
    /// The router is not ready to navigate yet.
    NotReady,
    /// Replay already ran for this router.
    AlreadyReplayed,
}

/// Routes notification events to in-app destinations.
pub struct NotificationRouter {
    navigator: Arc<dyn Navigator>,
    store: Arc<dyn KeyValueStore>,
    resolver: Box<dyn DeepLinkResolver>,
    pending_key: String,
    settling_delay: Duration,
    ready: AtomicBool,
    replayed: AtomicBool,
    liveness: Liveness,
}

impl NotificationRouter {
    /// Router using [`ScreenResolver`]. Starts alive and not ready.
    pub fn new(
        navigator: Arc<dyn Navigator>,
        store: Arc<dyn KeyValueStore>,
        config: &NavigatorConfig,
    ) -> Self {
        Self {
            navigator,
            store,
            resolver: Box::new(ScreenResolver),
            pending_key: config.pending_key.clone(),
            settling_delay: config.settling_delay_duration(),
            ready: AtomicBool::new(false),
            replayed: AtomicBool::new(false),
            liveness: Liveness::new(),
        }
    }

    /// Replace the deep-link resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl DeepLinkResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Share an owner's liveness flag instead of a private one.
    #[must_use]
    pub fn with_liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = liveness;
        self
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    /// Mark whether navigation is safe. Until then opened links are queued.
    pub fn set_ready(&self, ready: bool) {
        if self.ready.swap(ready, Ordering::SeqCst) != ready {
            debug_log!("Notification router ready: {}", ready);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Stop navigating. Safe to call more than once.
    pub fn release(&self) {
        self.liveness.release();
    }

    fn slot(&self) -> PendingDeepLinkSlot<'_> {
        PendingDeepLinkSlot::new(self.store.as_ref(), &self.pending_key)
    }

    /// Handle one event to completion.
    pub async fn handle_event(&self, event: &NotificationEvent) -> Disposition {
        match event.kind {
            EventKind::Received => {
                info_log!(
                    "Notification received in foreground ({} keys), not navigating",
                    event.payload.len()
                );
                Disposition::Ignored
            }
            EventKind::Opened | EventKind::AppLaunchedFrom => {
                trace_log!("Notification {:?}", event.kind);
                self.route(&event.payload).await
            }
        }
    }

    async fn route(&self, payload: &NotificationPayload) -> Disposition {
        if !self.liveness.is_alive() {
            debug_log!("Notification router released, ignoring event");
            return Disposition::Discarded(DiscardReason::Released);
        }
        if payload.is_empty() {
            debug_log!("Notification without data, nothing to open");
            return Disposition::Discarded(DiscardReason::EmptyPayload);
        }

        let link = match self.resolver.resolve(payload) {
            Resolution::Target(link) => link,
            Resolution::Discarded(reason) => {
                warn_log!("Discarding notification payload: {}", reason);
                return Disposition::Discarded(reason);
            }
        };

        if !self.is_ready() {
            return match self.slot().store(payload).await {
                Ok(()) => {
                    info_log!("App not ready, queued deep link to '{}'", link);
                    Disposition::Queued
                }
                Err(err) => {
                    warn_log!("Failed to queue deep link to '{}': {}", link, err);
                    Disposition::Dropped
                }
            };
        }

        let path = link.path();
        info_log!("Opening deep link '{}'", path);
        self.navigator.push(&path);
        Disposition::Navigated(path)
    }

    /// Replay the queued deep link, if any, after the settling delay.
    ///
    /// Runs at most once per router. The slot is re-read after the delay so
    /// a payload queued meanwhile replaces the earlier one.
    pub async fn replay_pending(&self) -> ReplayOutcome {
        if !self.is_ready() {
            return ReplayOutcome::NotReady;
        }
        if self.replayed.swap(true, Ordering::SeqCst) {
            return ReplayOutcome::AlreadyReplayed;
        }

        if self.read_slot().await.is_none() {
            trace_log!("No pending deep link");
            return ReplayOutcome::NothingQueued;
        }

        tokio::time::sleep(self.settling_delay).await;

        if !self.liveness.is_alive() {
            debug_log!("Owner released during settling delay, keeping pending deep link");
            return ReplayOutcome::Deferred;
        }

        let Some(payload) = self.read_slot().await else {
            return ReplayOutcome::NothingQueued;
        };
        let resolution = self.resolver.resolve(&payload);

        // The second read may have yielded; nothing below may run for a
        // released owner, including the clear.
        if !self.liveness.is_alive() {
            debug_log!("Owner released while reading pending deep link, keeping it");
            return ReplayOutcome::Deferred;
        }

        let outcome = match resolution {
            Resolution::Target(link) => {
                let path = link.path();
                info_log!("Replaying pending deep link '{}'", path);
                self.navigator.push(&path);
                ReplayOutcome::Replayed(path)
            }
            Resolution::Discarded(reason) => {
                warn_log!("Discarding pending deep link: {}", reason);
                ReplayOutcome::Discarded(reason)
            }
        };
        self.slot().clear().await;
        outcome
    }

    /// Read the slot. Unreadable storage counts as empty; corrupt contents
    /// are cleared.
    async fn read_slot(&self) -> Option<NotificationPayload> {
        match self.slot().load().await {
            Ok(payload) => payload,
            Err(err @ StorageError::Corrupt { .. }) => {
                warn_log!("Dropping unreadable pending deep link: {}", err);
                self.slot().clear().await;
                None
            }
            Err(err) => {
                warn_log!("Failed to read pending deep link: {}", err);
                None
            }
        }
    }

    /// Handle events from `subscription` until it closes or the router is
    /// released. Returns the number of events handled.
    ///
    /// Release wakes the loop even while it waits for the next event, so the
    /// subscription is dropped as soon as the owner goes away.
    pub async fn listen(&self, mut subscription: Subscription) -> usize {
        let mut handled = 0;
        loop {
            let event = tokio::select! {
                biased;
                () = self.liveness.released() => {
                    debug_log!("Notification router released, closing subscription");
                    break;
                }
                event = subscription.next() => event,
            };
            let Some(event) = event else {
                break;
            };
            self.handle_event(&event).await;
            handled += 1;
        }
        handled
    }
}
