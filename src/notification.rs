//! Notification events, payloads and the transport collaborator.
//!
//! A transport delivers three kinds of events (foreground receipt, tap from
//! background, cold start from a notification) through a [`Subscription`].
//! Subscriptions are scoped: dropping the handle unsubscribes, so a panic or
//! early return in the owner still releases it.

use crate::debug_log;
use crate::lifecycle::lock;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tokio::sync::mpsc;

// ============================================================================
// NotificationPayload
// ============================================================================

/// The `data` mapping of a notification.
///
/// Values are JSON scalars; ids often arrive as numbers from one backend
/// and strings from another, so [`get_str`](Self::get_str) accepts both.
///
/// ```
/// use ledger_navigator::NotificationPayload;
///
/// let payload = NotificationPayload::from_pairs([("screen", "transaction"), ("id", "42")]);
/// assert_eq!(payload.get_str("id").as_deref(), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPayload(BTreeMap<String, Value>);

impl NotificationPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a payload of string values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// Take the `data` object of a raw notification body.
    ///
    /// Returns an empty payload when `data` is missing or not an object.
    pub fn from_notification(body: &Value) -> Self {
        match body.get("data") {
            Some(Value::Object(map)) => Self(map.clone().into_iter().collect()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar value as text. Strings are trimmed; empty strings, null,
    /// arrays and objects yield `None`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

// ============================================================================
// NotificationEvent
// ============================================================================

/// How a notification reached the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Arrived while the app was in the foreground.
    Received,
    /// Tapped while the app was in the background.
    Opened,
    /// The app was cold-started from the notification.
    AppLaunchedFrom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub kind: EventKind,
    pub payload: NotificationPayload,
}

impl NotificationEvent {
    pub fn new(kind: EventKind, payload: NotificationPayload) -> Self {
        Self { kind, payload }
    }

    pub fn received(payload: NotificationPayload) -> Self {
        Self::new(EventKind::Received, payload)
    }

    pub fn opened(payload: NotificationPayload) -> Self {
        Self::new(EventKind::Opened, payload)
    }

    pub fn launched(payload: NotificationPayload) -> Self {
        Self::new(EventKind::AppLaunchedFrom, payload)
    }
}

// ============================================================================
// Transport
// ============================================================================

/// The external push-notification transport.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Subscribe to received/opened/launched events.
    fn subscribe(&self) -> Subscription;

    /// One-time pull: the notification the app was launched from, if any.
    async fn take_launch_notification(&self) -> Option<NotificationPayload>;
}

/// Scoped subscription handle. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    events: mpsc::UnboundedReceiver<NotificationEvent>,
}

impl Subscription {
    pub fn new(events: mpsc::UnboundedReceiver<NotificationEvent>) -> Self {
        Self { events }
    }

    /// Next event in delivery order, or `None` once the transport is gone.
    pub async fn next(&mut self) -> Option<NotificationEvent> {
        self.events.recv().await
    }

    /// Next already-delivered event, without waiting.
    pub fn try_next(&mut self) -> Option<NotificationEvent> {
        self.events.try_recv().ok()
    }

    /// Unsubscribe explicitly.
    pub fn release(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.events.close();
        debug_log!("Notification subscription released");
    }
}

/// In-process transport that fans events out to live subscriptions.
#[derive(Debug, Default)]
pub struct LocalTransport {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<NotificationEvent>>>,
    launch: Mutex<Option<NotificationPayload>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the notification the app is being launched from.
    pub fn set_launch_notification(&self, payload: NotificationPayload) {
        *lock(&self.launch) = Some(payload);
    }

    /// Deliver an event; returns how many subscriptions received it.
    pub fn emit(&self, event: NotificationEvent) -> usize {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }
}

#[async_trait]
impl NotificationTransport for LocalTransport {
    fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        Subscription::new(rx)
    }

    async fn take_launch_notification(&self) -> Option<NotificationPayload> {
        lock(&self.launch).take()
    }
}
