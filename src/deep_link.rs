//! Deep-link resolution.
//!
//! A notification payload is resolved to one of a closed set of in-app
//! destinations. Anything else is reported as a [`DiscardReason`] rather
//! than silently dropped, so the failure is visible to callers and tests.
//!
//! | Payload | Destination |
//! |---------|-------------|
//! | `{screen: "transaction", id: 42}` | `/transaction/42` |
//! | `{screen: "book", id: "b1"}` | `/book/b1` |
//! | `{screen: "asset", id}` | `/asset/{id}` |
//! | `{screen: "budget", id}` | `/budget/{id}` |
//! | `{screen: "notifications"}` | `/notifications` |
//! | `{screen: "settings"}` | `/settings` |
//! | `{url: "/book/b1/members"}` | `/book/b1/members` |
//!
//! `type` is accepted as an alias of `screen`, and `path` as an alias of
//! `url`. An explicit url takes precedence.

use crate::notification::NotificationPayload;
use std::fmt;

/// A validated in-app destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Transaction { id: String },
    Book { id: String },
    Asset { id: String },
    Budget { id: String },
    Notifications,
    Settings,
    /// Absolute in-app path carried verbatim by the payload.
    Path(String),
}

impl DeepLink {
    /// Route path to navigate to.
    pub fn path(&self) -> String {
        match self {
            Self::Transaction { id } => format!("/transaction/{id}"),
            Self::Book { id } => format!("/book/{id}"),
            Self::Asset { id } => format!("/asset/{id}"),
            Self::Budget { id } => format!("/budget/{id}"),
            Self::Notifications => "/notifications".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Path(path) => path.clone(),
        }
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Why a payload produced no navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// The payload had no data.
    EmptyPayload,
    /// No recognized key pattern.
    UnrecognizedPayload,
    /// A screen that needs an id arrived without one.
    MissingId { screen: String },
    /// The owner was unmounted before navigation could happen.
    Released,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => f.write_str("empty payload"),
            Self::UnrecognizedPayload => f.write_str("unrecognized payload"),
            Self::MissingId { screen } => write!(f, "'{screen}' link without id"),
            Self::Released => f.write_str("owner released"),
        }
    }
}

/// Result of resolving a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Target(DeepLink),
    Discarded(DiscardReason),
}

impl Resolution {
    pub fn target(&self) -> Option<&DeepLink> {
        match self {
            Self::Target(link) => Some(link),
            Self::Discarded(_) => None,
        }
    }
}

/// Maps a payload to a destination.
pub trait DeepLinkResolver: Send + Sync {
    fn resolve(&self, payload: &NotificationPayload) -> Resolution;
}

impl<F> DeepLinkResolver for F
where
    F: Fn(&NotificationPayload) -> Resolution + Send + Sync,
{
    fn resolve(&self, payload: &NotificationPayload) -> Resolution {
        self(payload)
    }
}

/// Resolver for the ledger client's screens.
///
/// ```
/// use ledger_navigator::{DeepLink, DeepLinkResolver, NotificationPayload, ScreenResolver};
///
/// let payload = NotificationPayload::from_pairs([("screen", "transaction"), ("id", "42")]);
/// let link = ScreenResolver.resolve(&payload);
/// assert_eq!(link.target(), Some(&DeepLink::Transaction { id: "42".into() }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenResolver;

impl DeepLinkResolver for ScreenResolver {
    fn resolve(&self, payload: &NotificationPayload) -> Resolution {
        if payload.is_empty() {
            return Resolution::Discarded(DiscardReason::EmptyPayload);
        }

        if let Some(url) = payload.get_str("url").or_else(|| payload.get_str("path")) {
            return if url.starts_with('/') && !url.starts_with("//") {
                Resolution::Target(DeepLink::Path(url))
            } else {
                Resolution::Discarded(DiscardReason::UnrecognizedPayload)
            };
        }

        let Some(screen) = payload
            .get_str("screen")
            .or_else(|| payload.get_str("type"))
        else {
            return Resolution::Discarded(DiscardReason::UnrecognizedPayload);
        };
        let screen = screen.to_ascii_lowercase();
        let id = payload.get_str("id");

        let with_id = |make: fn(String) -> DeepLink| match id.clone() {
            Some(id) => Resolution::Target(make(id)),
            None => Resolution::Discarded(DiscardReason::MissingId {
                screen: screen.clone(),
            }),
        };

        match screen.as_str() {
            "transaction" => with_id(|id| DeepLink::Transaction { id }),
            "book" => with_id(|id| DeepLink::Book { id }),
            "asset" => with_id(|id| DeepLink::Asset { id }),
            "budget" => with_id(|id| DeepLink::Budget { id }),
            "notifications" | "notification" => Resolution::Target(DeepLink::Notifications),
            "settings" => Resolution::Target(DeepLink::Settings),
            _ => Resolution::Discarded(DiscardReason::UnrecognizedPayload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(pairs: &[(&str, &str)]) -> Resolution {
        ScreenResolver.resolve(&NotificationPayload::from_pairs(pairs.iter().copied()))
    }

    #[test]
    fn test_screens_with_id() {
        assert_eq!(
            resolve(&[("screen", "transaction"), ("id", "42")])
                .target()
                .map(DeepLink::path),
            Some("/transaction/42".to_string())
        );
        assert_eq!(
            resolve(&[("type", "Budget"), ("id", "7")]).target(),
            Some(&DeepLink::Budget { id: "7".into() })
        );
        assert_eq!(
            resolve(&[("screen", "asset"), ("id", "a-1")]).target(),
            Some(&DeepLink::Asset { id: "a-1".into() })
        );
        assert_eq!(
            resolve(&[("screen", "book"), ("id", "b1")]).target(),
            Some(&DeepLink::Book { id: "b1".into() })
        );
    }

    #[test]
    fn test_numeric_id() {
        let payload = NotificationPayload::new()
            .with("screen", "transaction")
            .with("id", 42);
        assert_eq!(
            ScreenResolver.resolve(&payload).target().map(ToString::to_string),
            Some("/transaction/42".to_string())
        );
    }

    #[test]
    fn test_screens_without_id() {
        assert_eq!(
            resolve(&[("screen", "notifications")]).target(),
            Some(&DeepLink::Notifications)
        );
        assert_eq!(
            resolve(&[("screen", "settings")]).target(),
            Some(&DeepLink::Settings)
        );
    }

    #[test]
    fn test_missing_id() {
        assert_eq!(
            resolve(&[("screen", "budget")]),
            Resolution::Discarded(DiscardReason::MissingId {
                screen: "budget".into()
            })
        );
    }

    #[test]
    fn test_url_wins_over_screen() {
        assert_eq!(
            resolve(&[("url", "/book/b1/members"), ("screen", "settings")]).target(),
            Some(&DeepLink::Path("/book/b1/members".into()))
        );
        assert_eq!(
            resolve(&[("path", "/asset/3")]).target(),
            Some(&DeepLink::Path("/asset/3".into()))
        );
    }

    #[test]
    fn test_external_url_rejected() {
        for url in ["https://example.com", "//evil.example", "book/1"] {
            assert_eq!(
                resolve(&[("url", url)]),
                Resolution::Discarded(DiscardReason::UnrecognizedPayload),
                "{url}"
            );
        }
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(
            resolve(&[]),
            Resolution::Discarded(DiscardReason::EmptyPayload)
        );
        assert_eq!(
            resolve(&[("screen", "casino")]),
            Resolution::Discarded(DiscardReason::UnrecognizedPayload)
        );
        assert_eq!(
            resolve(&[("campaign", "spring")]),
            Resolution::Discarded(DiscardReason::UnrecognizedPayload)
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |_: &NotificationPayload| Resolution::Target(DeepLink::Settings);
        assert_eq!(
            resolver.resolve(&NotificationPayload::new()).target(),
            Some(&DeepLink::Settings)
        );
    }
}
