//! Frontend Models
//!
//! Data structures persisted to local storage.

use serde::{Deserialize, Serialize};

/// Todo data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub text: String,
    pub complete: bool,
}

impl Todo {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            complete: false,
        }
    }

    /// Copy of this todo with `complete` flipped
    pub fn toggled(&self) -> Self {
        Self {
            id: self.id,
            text: self.text.clone(),
            complete: !self.complete,
        }
    }

    /// Copy of this todo with new text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            id: self.id,
            text: text.into(),
            complete: self.complete,
        }
    }
}

/// Next id for a list: max existing id + 1, or 1 when empty.
/// `None` once the max id is `u32::MAX`.
pub fn next_id(todos: &[Todo]) -> Option<u32> {
    match todos.iter().map(|todo| todo.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
