//! Navigation stack with an explicit transition table.
//!
//! ```text
//!     Home ──────► Detail { todo_id }
//!      ▲ │            │
//!      │ │            │ (pop after toggle / delete)
//!      │ └──► Add ────┤ (modal; pop after submit)
//!      └──────────────┘
//! ```

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A screen in the stack
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// The todo list (initial route)
    Home,
    /// One todo, looked up by id when rendered
    Detail {
        /// Record to show
        todo_id: TodoId,
    },
    /// The add form, presented as a modal
    Add,
}

/// Parameter-free discriminant of [`Route`], used by the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteKind {
    /// [`Route::Home`]
    Home,
    /// [`Route::Detail`]
    Detail,
    /// [`Route::Add`]
    Add,
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Detail => "Detail",
            Self::Add => "Add",
        };
        f.write_str(name)
    }
}

/// How a route is shown on top of the one beneath it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// Regular stack push
    Card,
    /// Overlay over the previous screen
    Modal,
}

impl Route {
    /// The route's kind
    #[must_use]
    pub const fn kind(self) -> RouteKind {
        match self {
            Self::Home => RouteKind::Home,
            Self::Detail { .. } => RouteKind::Detail,
            Self::Add => RouteKind::Add,
        }
    }

    /// How the route is presented
    #[must_use]
    pub const fn presentation(self) -> Presentation {
        match self {
            Self::Add => Presentation::Modal,
            Self::Home | Self::Detail { .. } => Presentation::Card,
        }
    }
}

/// Valid navigation transitions.
///
/// Any transition not in this table is rejected by [`NavigationStack::push`].
pub const TRANSITIONS: &[(RouteKind, RouteKind)] = &[
    (RouteKind::Home, RouteKind::Detail),
    (RouteKind::Home, RouteKind::Add),
    (RouteKind::Detail, RouteKind::Home),
    (RouteKind::Add, RouteKind::Home),
];

/// Check if a transition is valid based on the table.
#[must_use]
pub fn is_valid_transition(from: RouteKind, to: RouteKind) -> bool {
    TRANSITIONS.contains(&(from, to))
}

/// Navigation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The transition is not in [`TRANSITIONS`]
    #[error("Invalid navigation from {from} to {to}")]
    InvalidTransition {
        /// Route on top of the stack
        from: RouteKind,
        /// Route that was requested
        to: RouteKind,
    },
}

/// Screen history, rooted at [`Route::Home`]
///
/// The root is never popped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    routes: Vec<Route>,
}

impl NavigationStack {
    /// Creates a stack showing Home
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: vec![Route::Home],
        }
    }

    /// The route on top
    #[must_use]
    pub fn current(&self) -> Route {
        self.routes.last().copied().unwrap_or(Route::Home)
    }

    /// Number of routes in the stack, root included
    #[must_use]
    pub fn depth(&self) -> usize {
        self.routes.len()
    }

    /// All routes, root first
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Pushes `route` on top of the current route
    ///
    /// Moving back to Home is expressed by popping, so pushing Home is only
    /// accepted from a screen whose table entry allows it and then unwinds
    /// to the root instead of stacking a second Home.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidTransition`] if the table does not
    /// allow moving from the current route to `route`.
    pub fn push(&mut self, route: Route) -> Result<(), NavigationError> {
        let from = self.current().kind();
        let to = route.kind();
        if !is_valid_transition(from, to) {
            return Err(NavigationError::InvalidTransition { from, to });
        }
        if to == RouteKind::Home {
            self.pop_to_root();
        } else {
            self.routes.push(route);
        }
        Ok(())
    }

    /// Pops the top route, returning it
    ///
    /// Returns `None` when only the root is left.
    pub fn pop(&mut self) -> Option<Route> {
        if self.routes.len() > 1 {
            self.routes.pop()
        } else {
            None
        }
    }

    /// Pops everything above the root
    pub fn pop_to_root(&mut self) {
        self.routes.truncate(1);
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}
