//! Test utilities shared by the integration tests
//!
//! Provides a wired-up root layout over the in-memory collaborators, payload
//! fixtures and a storage backend that fails on demand.

#![allow(dead_code)]

use async_trait::async_trait;
use ledger_navigator::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Route log output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Root layout plus handles on every collaborator.
pub struct Harness {
    pub auth: Arc<StaticAuthStore>,
    pub navigator: Arc<MemoryRouter>,
    pub store: Arc<MemoryStore>,
    pub transport: LocalTransport,
    pub root: RootLayout,
}

impl Harness {
    pub fn new(status: AuthStatus, path: &str) -> Self {
        Self::with_config(status, path, &NavigatorConfig::default())
    }

    pub fn with_config(status: AuthStatus, path: &str, config: &NavigatorConfig) -> Self {
        init_logging();
        let auth = Arc::new(StaticAuthStore::new(status));
        let navigator = Arc::new(MemoryRouter::new(path));
        let store = Arc::new(MemoryStore::new());
        let root = RootLayout::new(auth.clone(), navigator.clone(), store.clone(), config)
            .expect("test config is valid");
        Self {
            auth,
            navigator,
            store,
            transport: LocalTransport::new(),
            root,
        }
    }

    /// Paths of every recorded navigation, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.navigator.changes().into_iter().map(|c| c.to).collect()
    }

    pub fn pending(&self) -> Option<String> {
        self.store.peek("pendingDeepLink")
    }
}

pub fn transaction_payload(id: &str) -> NotificationPayload {
    NotificationPayload::from_pairs([("screen", "transaction"), ("id", id)])
}

pub fn budget_payload(id: &str) -> NotificationPayload {
    NotificationPayload::from_pairs([("screen", "budget"), ("id", id)])
}

/// Storage whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn failing_reads() -> Self {
        let store = Self::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        store
    }

    pub fn failing_writes() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::backend("read failed"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> std::result::Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::backend("write failed"));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::backend("write failed"));
        }
        self.inner.remove(key).await
    }
}
