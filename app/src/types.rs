//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of records. Every mutation rebuilds the
//! sequence from the previous one (append, map-replace-one, filter-exclude-one),
//! so display order is always insertion order.

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a todo item
///
/// Milliseconds since the Unix epoch at creation, bumped when needed so that
/// identifiers stay unique and increasing within a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw millisecond value
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Title, shown in the list
    pub title: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Whether the todo is done
    pub done: bool,
}

impl TodoItem {
    /// Creates a new, not yet done, todo item
    #[must_use]
    pub const fn new(id: TodoId, title: String, description: String) -> Self {
        Self {
            id,
            title,
            description,
            done: false,
        }
    }

    /// Returns a copy with `done` inverted
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            done: !self.done,
            ..self.clone()
        }
    }
}

/// The ordered todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<TodoItem>,
    /// Highest identifier ever added, kept across deletes
    #[serde(default)]
    last_issued: Option<TodoId>,
}

impl TodoList {
    /// Creates a new empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            last_issued: None,
        }
    }

    /// Returns the identifier to use for a record created at `now_millis`
    ///
    /// Always greater than every identifier added before, including those
    /// of records since deleted.
    #[must_use]
    pub fn next_id(&self, now_millis: i64) -> TodoId {
        let floor = self
            .last_issued
            .map_or(i64::MIN, |last| last.as_i64().saturating_add(1));
        TodoId(now_millis.max(floor))
    }

    /// Appends a new record; title and description are stored verbatim
    pub fn add(&mut self, id: TodoId, title: String, description: String) -> TodoId {
        let item = TodoItem::new(id, title, description);
        self.last_issued = self.last_issued.max(Some(id));
        self.items = self
            .items
            .iter()
            .cloned()
            .chain(std::iter::once(item))
            .collect();
        id
    }

    /// Inverts `done` on the record matching `id`
    ///
    /// Returns `false`, leaving the list untouched, if no record matches.
    pub fn toggle_done(&mut self, id: TodoId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.items = self
            .items
            .iter()
            .map(|t| if t.id == id { t.toggled() } else { t.clone() })
            .collect();
        true
    }

    /// Removes the record matching `id`
    ///
    /// Returns `false`, leaving the list untouched, if no record matches.
    pub fn delete(&mut self, id: TodoId) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.items = self.items.iter().filter(|t| t.id != id).cloned().collect();
        true
    }

    /// Looks up a record by identifier
    #[must_use]
    pub fn find(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Checks if a record exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.find(id).is_some()
    }

    /// Iterates records in display (insertion) order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    /// Returns the records as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[TodoItem] {
        &self.items
    }

    /// Returns the number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of done records
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.done).count()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
