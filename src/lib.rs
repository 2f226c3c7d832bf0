//! Navigation core for a household ledger (가계부) client.
//!
//! Two decision components sit between the app's collaborators and its
//! screens:
//!
//! - [`NavigationGuard`] keeps the visible route consistent with the auth
//!   session: signed-out users land on login, signed-in users never see
//!   login or signup.
//! - [`NotificationRouter`] turns notification taps into navigation, and
//!   defers them through a single persistent slot while the app is still
//!   starting.
//!
//! [`RootLayout`] wires both to the auth store, router and storage
//! collaborators for one app mount.
//!
//! Collaborators are traits ([`AuthStore`], [`Navigator`],
//! [`KeyValueStore`], [`NotificationTransport`], [`DeepLinkResolver`]) and
//! are always injected; in-memory implementations are provided for tests
//! and headless hosts.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ledger_navigator::{
//!     AuthStatus, MemoryRouter, MemoryStore, NavigatorConfig, Render, RootLayout,
//!     StaticAuthStore,
//! };
//!
//! let auth = Arc::new(StaticAuthStore::new(AuthStatus::SIGNED_OUT));
//! let navigator = Arc::new(MemoryRouter::new("/(tabs)"));
//! let root = RootLayout::new(
//!     auth,
//!     navigator.clone(),
//!     Arc::new(MemoryStore::new()),
//!     &NavigatorConfig::default(),
//! )?;
//!
//! root.set_assets_ready(true);
//! assert_eq!(root.on_state_change(), Render::Content);
//! assert_eq!(navigator.current_path(), "/login");
//! # Ok::<(), ledger_navigator::ConfigError>(())
//! ```
//!
//! # Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | log through the `log` crate |
//! | `tracing` | no | log through the `tracing` crate |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod auth;
pub mod config;
pub mod deep_link;
pub mod error;
pub mod format;
pub mod guards;
pub mod lifecycle;
pub mod logging;
pub mod notification;
pub mod root;
pub mod route;
pub mod router;
pub mod state;
pub mod storage;
pub mod validation;

pub use auth::{AuthStatus, AuthStore, StaticAuthStore};
pub use config::NavigatorConfig;
pub use deep_link::{DeepLink, DeepLinkResolver, DiscardReason, Resolution, ScreenResolver};
pub use error::{AuthError, ConfigError, Error, Result, StorageError};
pub use guards::{
    guard_fn, AuthGuard, FnGuard, GuardContext, Guards, NavigationGuard, RouteGuard,
};
pub use lifecycle::{Liveness, NavigationAction};
pub use notification::{
    EventKind, LocalTransport, NotificationEvent, NotificationPayload, NotificationTransport,
    Subscription,
};
pub use root::{Render, RootLayout};
pub use route::{AuthScreen, RouteKind, RouteLocation};
pub use router::{Disposition, NotificationRouter, ReplayOutcome};
pub use state::{MemoryRouter, NavigationDirection, Navigator, RouteChangeEvent};
pub use storage::{KeyValueStore, MemoryStore, PendingDeepLinkSlot};
