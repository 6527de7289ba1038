//! Reducer logic for the todo application.
//!
//! One reducer owns the whole application state: the todo list, the
//! navigation stack, and the Add screen's form. Screens never touch state
//! directly; they send actions. Every stack change goes through
//! [`NavigationAction`], and actions that mutate the list return the
//! follow-up navigation as an effect, so the pop is only reduced after the
//! new list has been committed.

use crate::form::AddForm;
use crate::navigation::{NavigationStack, Route};
use crate::types::{TodoId, TodoList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasklist_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};

/// Root application state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// The todo list, in display order
    pub todos: TodoList,
    /// Screen history
    pub navigation: NavigationStack,
    /// Fields of the Add screen
    pub add_form: AddForm,
}

impl AppState {
    /// Creates the startup state: an empty list showing Home
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The route on top of the stack
    #[must_use]
    pub fn current_route(&self) -> Route {
        self.navigation.current()
    }
}

/// Actions sent by the Home screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeAction {
    /// A row was tapped
    RowTapped {
        /// Record behind the row
        id: TodoId,
    },
    /// The header's "Add" button was tapped
    AddTapped,
}

/// Actions sent by the Detail screen; the record is the one in the route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailAction {
    /// "Mark as Done" / "Unmark" was tapped
    ToggleTapped,
    /// "Delete" was tapped
    DeleteTapped,
}

/// Actions sent by the Add screen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddAction {
    /// The title field changed
    TitleChanged(String),
    /// The description field changed
    DescriptionChanged(String),
    /// "Add to list" was tapped
    SubmitTapped,
}

/// Stack transitions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationAction {
    /// Show a route on top of the current one
    Push(Route),
    /// Go back one step
    Pop,
}

/// Every input the application reducer handles
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppAction {
    /// From the Home screen
    Home(HomeAction),
    /// From the Detail screen
    Detail(DetailAction),
    /// From the Add screen
    Add(AddAction),
    /// Stack transitions, sent by the user (back) or fed back by effects
    Navigation(NavigationAction),
}

impl AppAction {
    /// The pop fed back after a list mutation
    #[must_use]
    pub const fn pop() -> Self {
        Self::Navigation(NavigationAction::Pop)
    }

    /// A push of `route`
    #[must_use]
    pub const fn push(route: Route) -> Self {
        Self::Navigation(NavigationAction::Push(route))
    }
}

/// Environment dependencies for the application reducer
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock for generating record identifiers
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the whole application
#[derive(Clone, Debug, Default)]
pub struct AppReducer;

type Effects = SmallVec<[Effect<AppAction>; 4]>;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn reduce_home(state: &mut AppState, action: HomeAction) -> Effects {
        if state.current_route() != Route::Home {
            tracing::warn!(?action, route = ?state.current_route(), "Ignoring Home action off screen");
            return SmallVec::new();
        }

        match action {
            HomeAction::RowTapped { id } => {
                if !state.todos.exists(id) {
                    tracing::warn!(%id, "Row tapped for unknown todo");
                    return SmallVec::new();
                }
                smallvec![Effect::send(AppAction::push(Route::Detail { todo_id: id }))]
            },
            HomeAction::AddTapped => {
                state.add_form.reset();
                smallvec![Effect::send(AppAction::push(Route::Add))]
            },
        }
    }

    fn reduce_detail(state: &mut AppState, action: &DetailAction) -> Effects {
        let Route::Detail { todo_id } = state.current_route() else {
            tracing::warn!(?action, route = ?state.current_route(), "Ignoring Detail action off screen");
            return SmallVec::new();
        };

        let applied = match action {
            DetailAction::ToggleTapped => state.todos.toggle_done(todo_id),
            DetailAction::DeleteTapped => state.todos.delete(todo_id),
        };

        if applied {
            tracing::info!(id = %todo_id, ?action, "Todo updated");
        } else {
            tracing::debug!(id = %todo_id, ?action, "Todo not found, list unchanged");
        }

        // Back to the list either way; a stale detail has nothing to show
        smallvec![Effect::send(AppAction::pop())]
    }

    fn reduce_add(state: &mut AppState, action: AddAction, env: &AppEnvironment) -> Effects {
        if state.current_route() != Route::Add {
            tracing::warn!(route = ?state.current_route(), "Ignoring Add action off screen");
            return SmallVec::new();
        }

        match action {
            AddAction::TitleChanged(title) => {
                state.add_form.set_title(title);
                SmallVec::new()
            },
            AddAction::DescriptionChanged(description) => {
                state.add_form.set_description(description);
                SmallVec::new()
            },
            AddAction::SubmitTapped => {
                let (title, description) = state.add_form.take();
                let id = state.todos.next_id(env.clock.now_millis());
                state.todos.add(id, title, description);
                tracing::info!(%id, count = state.todos.len(), "Todo added");

                smallvec![Effect::send(AppAction::pop())]
            },
        }
    }

    fn reduce_navigation(state: &mut AppState, action: NavigationAction) -> Effects {
        match action {
            NavigationAction::Push(route) => {
                if let Route::Detail { todo_id } = route {
                    if !state.todos.exists(todo_id) {
                        tracing::warn!(id = %todo_id, "Refusing to show unknown todo");
                        return SmallVec::new();
                    }
                }
                match state.navigation.push(route) {
                    Ok(()) => tracing::debug!(?route, depth = state.navigation.depth(), "Pushed route"),
                    Err(error) => tracing::warn!(%error, "Navigation rejected"),
                }
            },
            NavigationAction::Pop => match state.navigation.pop() {
                Some(Route::Add) => {
                    // Unsubmitted input is discarded with the modal
                    state.add_form.reset();
                    tracing::debug!("Dismissed Add");
                },
                Some(route) => tracing::debug!(?route, "Popped route"),
                None => tracing::debug!("Already at root, nothing to pop"),
            },
        }
        SmallVec::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Home(action) => Self::reduce_home(state, action),
            AppAction::Detail(action) => Self::reduce_detail(state, &action),
            AppAction::Add(action) => Self::reduce_add(state, action, env),
            AppAction::Navigation(action) => Self::reduce_navigation(state, action),
        }
    }
}
