//! Router collaborator and an in-memory implementation.

use crate::lifecycle::lock;
use crate::route::RouteLocation;
use crate::trace_log;
use std::sync::{Mutex, MutexGuard};

/// The external router.
///
/// Navigation calls are fire-and-forget: callers never wait for the screen
/// to change.
pub trait Navigator: Send + Sync {
    /// Current route segments.
    fn location(&self) -> RouteLocation;

    /// Replace the current history entry.
    fn replace(&self, path: &str);

    /// Push a new history entry.
    fn push(&self, path: &str);
}

/// Direction of a recorded route change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Forward,
    Back,
    Replace,
}

/// A recorded route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    pub from: Option<String>,
    pub to: String,
    pub direction: NavigationDirection,
}

#[derive(Debug)]
struct Stack {
    /// Bottom first; never empty.
    entries: Vec<String>,
    changes: Vec<RouteChangeEvent>,
}

impl Stack {
    fn top(&self) -> &str {
        self.entries.last().map_or("/", String::as_str)
    }

    fn record(&mut self, from: String, to: String, direction: NavigationDirection) -> RouteChangeEvent {
        let event = RouteChangeEvent {
            from: Some(from),
            to,
            direction,
        };
        self.changes.push(event.clone());
        event
    }
}

/// In-memory [`Navigator`] over a screen stack that records every change.
///
/// Push adds a screen, replace swaps the top one, back pops. Like a native
/// stack navigator there is no forward history.
///
/// # Example
///
/// ```
/// use ledger_navigator::{MemoryRouter, Navigator};
///
/// let router = MemoryRouter::new("/(tabs)");
/// router.replace("/login");
/// assert_eq!(router.current_path(), "/login");
/// assert!(!router.can_go_back());
/// ```
#[derive(Debug)]
pub struct MemoryRouter {
    stack: Mutex<Stack>,
}

impl MemoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![initial.into()],
                changes: Vec::new(),
            }),
        }
    }

    fn stack(&self) -> MutexGuard<'_, Stack> {
        lock(&self.stack)
    }

    pub fn current_path(&self) -> String {
        self.stack().top().to_string()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack().entries.len() > 1
    }

    /// Screens on the stack.
    pub fn depth(&self) -> usize {
        self.stack().entries.len()
    }

    /// Simulate the hardware back button. `None` on the root screen.
    pub fn back(&self) -> Option<RouteChangeEvent> {
        let mut stack = self.stack();
        if stack.entries.len() < 2 {
            return None;
        }
        let from = stack.entries.pop()?;
        let to = stack.top().to_string();
        Some(stack.record(from, to, NavigationDirection::Back))
    }

    /// Every change made through this router, oldest first.
    pub fn changes(&self) -> Vec<RouteChangeEvent> {
        self.stack().changes.clone()
    }

    /// Jump to a path without recording a change, as a user tap would.
    pub fn set_location(&self, path: impl Into<String>) {
        let mut stack = self.stack();
        if let Some(top) = stack.entries.last_mut() {
            *top = path.into();
        }
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryRouter {
    fn location(&self) -> RouteLocation {
        RouteLocation::from_path(self.stack().top())
    }

    fn replace(&self, path: &str) {
        trace_log!("MemoryRouter::replace '{}'", path);
        let mut stack = self.stack();
        let from = stack.top().to_string();
        if let Some(top) = stack.entries.last_mut() {
            *top = path.to_string();
        }
        stack.record(from, path.to_string(), NavigationDirection::Replace);
    }

    fn push(&self, path: &str) {
        trace_log!("MemoryRouter::push '{}'", path);
        let mut stack = self.stack();
        let from = stack.top().to_string();
        stack.entries.push(path.to_string());
        stack.record(from, path.to_string(), NavigationDirection::Forward);
    }
}
