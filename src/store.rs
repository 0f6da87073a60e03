//! View State Store
//!
//! Uses Leptos reactive_stores for the list the view renders.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Todo;

/// What the view renders; written only by the model's change listener
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    /// Bumped on every write; the list subtree is remounted per revision
    pub revision: u32,
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

/// Get the todo store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

/// Replace the rendered list
pub fn store_set_todos(store: &TodoStore, todos: &[Todo]) {
    *store.todos().write() = todos.to_vec();
    store_refresh(store);
}

/// Rebuild the list DOM without changing the list
pub fn store_refresh(store: &TodoStore) {
    store.revision().update(|rev| *rev = rev.wrapping_add(1));
}
