//! Todos Frontend App
//!
//! Controller: wires the model's change listener to the view store and the
//! view's handlers to model mutations.

use leptos::prelude::*;
use log::{error, info, warn};
use reactive_stores::Store;

use crate::components::{TodoForm, TodoList};
use crate::config::AppConfig;
use crate::model::TodoModel;
use crate::storage::{BrowserStorage, MemoryStorage, StorageResult, TodoStorage};
use crate::store::{store_set_todos, TodoState};

/// Browser storage, or memory when the page cannot use localStorage
fn open_storage() -> Box<dyn TodoStorage> {
    match BrowserStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            warn!("{}; changes will not survive a reload", e);
            Box::new(MemoryStorage::new())
        }
    }
}

fn report<T>(action: &str, result: StorageResult<T>) {
    if let Err(e) = result {
        error!("{} failed: {}", action, e);
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(TodoState::default());
    provide_context(store);

    let mut model = TodoModel::open(open_storage(), &config);
    info!("loaded {} todos from {:?}", model.todos().len(), config.storage_key);
    model.bind_todo_list_changed(move |todos| store_set_todos(&store, todos));
    store_set_todos(&store, model.todos());
    let model = StoredValue::new_local(model);

    let on_add = Callback::new(move |text: String| {
        model.update_value(|m| report("add", m.add(&text)));
    });
    let on_delete = Callback::new(move |id: u32| {
        model.update_value(|m| report("delete", m.delete(id)));
    });
    let on_toggle = Callback::new(move |id: u32| {
        model.update_value(|m| report("toggle", m.toggle(id)));
    });
    let on_edit = Callback::new(move |(id, text): (u32, String)| {
        model.update_value(|m| report("edit", m.edit(id, &text)));
    });

    view! {
        <h1>{config.title.clone()}</h1>
        <TodoForm on_add=on_add />
        <TodoList on_delete=on_delete on_toggle=on_toggle on_edit=on_edit />
    }
}
