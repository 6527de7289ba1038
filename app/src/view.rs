//! Screen view models.
//!
//! Rendering is a pure function of [`AppState`]: each screen reads what it
//! needs from the state it is handed and never holds on to it.

use crate::navigation::{Presentation, Route};
use crate::reducer::AppState;
use crate::types::{TodoId, TodoItem, TodoList};

/// Header button on the Home screen
pub const ADD_BUTTON: &str = "Add";
/// Toggle label for a record that is not done
pub const MARK_DONE_LABEL: &str = "Mark as Done";
/// Toggle label for a done record
pub const UNMARK_LABEL: &str = "Unmark";
/// Delete button on the Detail screen
pub const DELETE_LABEL: &str = "Delete";
/// Placeholder of the title field
pub const TITLE_PLACEHOLDER: &str = "Title";
/// Placeholder of the description field
pub const DESCRIPTION_PLACEHOLDER: &str = "Description";
/// Submit button on the Add screen
pub const SUBMIT_LABEL: &str = "Add to list";

/// One row of the Home list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Record behind the row, sent back when the row is tapped
    pub id: TodoId,
    /// Title text
    pub title: String,
    /// Struck through when `true`
    pub done: bool,
}

/// The Home screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeView {
    /// Rows in store order
    pub rows: Vec<Row>,
    /// Label of the header button
    pub header_action: &'static str,
}

/// The Detail screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailView {
    /// The record exists
    Found {
        /// Record shown
        id: TodoId,
        /// Title text
        title: String,
        /// Description text
        description: String,
        /// Struck through when `true`
        done: bool,
        /// "Mark as Done" or "Unmark"
        toggle_label: &'static str,
        /// "Delete"
        delete_label: &'static str,
    },
    /// The id in the route no longer matches a record
    NotFound {
        /// Id that was looked up
        id: TodoId,
    },
}

/// The Add screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddView {
    /// Current title field
    pub title: String,
    /// Current description field
    pub description: String,
    /// Placeholder shown for an empty title
    pub title_placeholder: &'static str,
    /// Placeholder shown for an empty description
    pub description_placeholder: &'static str,
    /// Label of the submit button
    pub submit_label: &'static str,
    /// Always [`Presentation::Modal`]
    pub presentation: Presentation,
}

/// Whatever is on top of the stack
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// List of todos
    Home(HomeView),
    /// One todo
    Detail(DetailView),
    /// New todo form
    Add(AddView),
}

/// Renders the Home screen from the list
#[must_use]
pub fn home(todos: &TodoList) -> HomeView {
    HomeView {
        rows: todos
            .iter()
            .map(|t| Row {
                id: t.id,
                title: t.title.clone(),
                done: t.done,
            })
            .collect(),
        header_action: ADD_BUTTON,
    }
}

/// Renders the Detail screen for `id`
#[must_use]
pub fn detail(todos: &TodoList, id: TodoId) -> DetailView {
    match todos.find(id) {
        Some(TodoItem {
            id,
            title,
            description,
            done,
        }) => DetailView::Found {
            id: *id,
            title: title.clone(),
            description: description.clone(),
            done: *done,
            toggle_label: if *done { UNMARK_LABEL } else { MARK_DONE_LABEL },
            delete_label: DELETE_LABEL,
        },
        None => DetailView::NotFound { id },
    }
}

/// Renders the Add screen from the form fields
#[must_use]
pub fn add(state: &AppState) -> AddView {
    AddView {
        title: state.add_form.title.clone(),
        description: state.add_form.description.clone(),
        title_placeholder: TITLE_PLACEHOLDER,
        description_placeholder: DESCRIPTION_PLACEHOLDER,
        submit_label: SUBMIT_LABEL,
        presentation: Route::Add.presentation(),
    }
}

/// Renders the screen on top of the stack
#[must_use]
pub fn render(state: &AppState) -> Screen {
    match state.current_route() {
        Route::Home => Screen::Home(home(&state.todos)),
        Route::Detail { todo_id } => Screen::Detail(detail(&state.todos, todo_id)),
        Route::Add => Screen::Add(add(state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppState {
        let mut state = AppState::new();
        state.todos.add(TodoId::new(1), "A".to_string(), String::new());
        state.todos.add(TodoId::new(2), "B".to_string(), "x".to_string());
        state.todos.toggle_done(TodoId::new(2));
        state
    }

    #[test]
    fn home_rows_follow_store_order() {
        let Screen::Home(view) = render(&sample()) else {
            unreachable!("startup route is Home");
        };
        assert_eq!(view.header_action, "Add");
        assert_eq!(
            view.rows,
            vec![
                Row {
                    id: TodoId::new(1),
                    title: "A".to_string(),
                    done: false,
                },
                Row {
                    id: TodoId::new(2),
                    title: "B".to_string(),
                    done: true,
                },
            ]
        );
    }

    #[test]
    fn detail_toggle_label_follows_done() {
        let state = sample();
        match detail(&state.todos, TodoId::new(1)) {
            DetailView::Found { toggle_label, .. } => assert_eq!(toggle_label, "Mark as Done"),
            DetailView::NotFound { .. } => unreachable!("record 1 exists"),
        }
        match detail(&state.todos, TodoId::new(2)) {
            DetailView::Found {
                toggle_label,
                description,
                done,
                ..
            } => {
                assert_eq!(toggle_label, "Unmark");
                assert_eq!(description, "x");
                assert!(done);
            },
            DetailView::NotFound { .. } => unreachable!("record 2 exists"),
        }
    }

    #[test]
    fn detail_for_missing_record_is_placeholder() {
        assert_eq!(
            detail(&sample().todos, TodoId::new(3)),
            DetailView::NotFound { id: TodoId::new(3) }
        );
    }

    #[test]
    fn add_view_is_modal_with_labels() {
        let mut state = AppState::new();
        state.navigation.push(Route::Add).unwrap();
        state.add_form.set_title("T".to_string());

        let Screen::Add(view) = render(&state) else {
            unreachable!("Add is on top");
        };
        assert_eq!(view.title, "T");
        assert_eq!(view.description, "");
        assert_eq!(view.title_placeholder, "Title");
        assert_eq!(view.description_placeholder, "Description");
        assert_eq!(view.submit_label, "Add to list");
        assert_eq!(view.presentation, Presentation::Modal);
    }
}
