//! Route locations and auth-route classification.

use std::fmt;

/// Screens that belong to the authentication flow.
///
/// This is a closed set: a first segment that is not listed here makes the
/// route protected, no matter how similar it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthScreen {
    Login,
    Signup,
}

impl AuthScreen {
    /// Every auth screen.
    pub const ALL: [AuthScreen; 2] = [AuthScreen::Login, AuthScreen::Signup];

    /// Match a route segment exactly.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "login" => Some(Self::Login),
            "signup" => Some(Self::Signup),
            _ => None,
        }
    }

    /// Route segment of this screen.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }
}

/// Whether a route is part of the auth flow or requires a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Auth(AuthScreen),
    Protected,
}

impl RouteKind {
    pub fn is_auth(self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Current route as ordered path segments.
///
/// # Example
///
/// ```
/// use ledger_navigator::{RouteLocation, RouteKind, AuthScreen};
///
/// let location = RouteLocation::from_path("/(tabs)/transactions");
/// assert_eq!(location.first(), Some("(tabs)"));
/// assert_eq!(location.kind(), RouteKind::Protected);
///
/// let login = RouteLocation::from_path("/login");
/// assert_eq!(login.kind(), RouteKind::Auth(AuthScreen::Login));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteLocation {
    segments: Vec<String>,
}

impl RouteLocation {
    /// Build a location from segments as reported by the router.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a path into segments, ignoring empty ones and any query string.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, the auth-route discriminant.
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Classify the route. The root location (no segments) is protected.
    pub fn kind(&self) -> RouteKind {
        self.first()
            .and_then(AuthScreen::from_segment)
            .map_or(RouteKind::Protected, RouteKind::Auth)
    }

    /// Absolute path form (`/a/b`).
    pub fn to_path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl fmt::Display for RouteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}
