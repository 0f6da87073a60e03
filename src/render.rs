//! Render Utilities
//!
//! Helpers deciding what the todo list shows, independent of the DOM.

use crate::models::Todo;

/// Text shown when the list is empty
pub const EMPTY_PLACEHOLDER: &str = "Empty Todo!!";

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRow {
    Placeholder(&'static str),
    Todo { id: u32, text: String, struck: bool },
}

/// Rows in display order; an empty list yields a single placeholder
pub fn display_rows(todos: &[Todo]) -> Vec<DisplayRow> {
    if todos.is_empty() {
        return vec![DisplayRow::Placeholder(EMPTY_PLACEHOLDER)];
    }
    todos
        .iter()
        .map(|todo| DisplayRow::Todo {
            id: todo.id,
            text: todo.text.clone(),
            struck: todo.complete,
        })
        .collect()
}

/// Text to add from the form input; `None` when blank
pub fn submitted_text(raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// What to do when an editable span loses focus
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Blank text: re-render the stored text
    Restore,
    /// Text unchanged
    Skip,
    Edit(String),
}

pub fn edit_action(current: &str, typed: &str) -> EditAction {
    let typed = typed.trim();
    if typed.is_empty() {
        EditAction::Restore
    } else if typed == current {
        EditAction::Skip
    } else {
        EditAction::Edit(typed.to_string())
    }
}

/// Todo id stored in a row element's `id` attribute
pub fn parse_todo_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
