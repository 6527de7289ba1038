//! Todo list application built on the Tasklist reducer architecture.
//!
//! Three screens share one in-memory list:
//!
//! - **Home** lists todos in insertion order and opens Add from its header
//! - **Detail** shows one todo and toggles or deletes it, then goes back
//! - **Add** is a modal form that appends a todo, then goes back
//!
//! All state lives in [`AppState`] inside a [`tasklist_runtime::Store`].
//! Screens are rendered by pure functions in [`view`] and talk back only by
//! sending [`AppAction`]s.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::{AddAction, AppAction, AppEnvironment, AppReducer, AppState, HomeAction};
//! use tasklist_core::environment::SystemClock;
//! use tasklist_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = AppEnvironment::new(Arc::new(SystemClock));
//! let store = Store::new(AppState::new(), AppReducer::new(), env);
//!
//! store.send(AppAction::Home(HomeAction::AddTapped)).await?;
//! store.send(AppAction::Add(AddAction::TitleChanged("Buy milk".to_string()))).await?;
//! store.send(AppAction::Add(AddAction::SubmitTapped)).await?;
//!
//! // Back on Home, showing the new todo
//! let count = store.state(|s| s.todos.len()).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod form;
pub mod navigation;
pub mod reducer;
pub mod shell;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use navigation::{NavigationStack, Route};
pub use reducer::{
    AddAction, AppAction, AppEnvironment, AppReducer, AppState, DetailAction, HomeAction,
    NavigationAction,
};
pub use types::{TodoId, TodoItem, TodoList};

/// The store type the application runs on
pub type AppStore = tasklist_runtime::Store<AppState, AppAction, AppEnvironment, AppReducer>;
