//! Local state of the Add screen.

use serde::{Deserialize, Serialize};

/// Text typed into the Add screen, not yet part of the list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddForm {
    /// Single-line title field
    pub title: String,
    /// Multi-line description field
    pub description: String,
}

impl AddForm {
    /// Creates an empty form
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
        }
    }

    /// Replaces the title field
    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Replaces the description field
    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    /// Clears both fields
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `(title, description)` verbatim and clears the form
    pub fn take(&mut self) -> (String, String) {
        let form = std::mem::take(self);
        (form.title, form.description)
    }
}
