//! Todo List Component
//!
//! Renders the store's list and turns delegated DOM events into handler
//! calls. The whole list is remounted whenever the store changes.

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;

use crate::components::TodoRow;
use crate::render::{display_rows, edit_action, parse_todo_id, DisplayRow, EditAction};
use crate::store::{store_refresh, use_todo_store, TodoStateStoreFields};

/// Element that fired the event
fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

/// Todo id from the `<li>` enclosing `el`
fn row_id(el: &web_sys::Element) -> Option<u32> {
    let parent = el.parent_element()?;
    let id = parse_todo_id(&parent.id());
    if id.is_none() {
        debug!("ignoring event from row with id {:?}", parent.id());
    }
    id
}

#[component]
pub fn TodoList(
    #[prop(into)] on_delete: Callback<u32>,
    #[prop(into)] on_toggle: Callback<u32>,
    #[prop(into)] on_edit: Callback<(u32, String)>,
) -> impl IntoView {
    let store = use_todo_store();

    let on_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = event_element(&ev) else { return };
        if target.class_name() == "delete" {
            if let Some(id) = row_id(&target) {
                on_delete.run(id);
            }
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(target) = event_element(&ev) else { return };
        let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() else { return };
        if input.type_() == "checkbox" {
            if let Some(id) = row_id(&target) {
                on_toggle.run(id);
            }
        }
    };

    let on_focusout = move |ev: web_sys::FocusEvent| {
        let Some(target) = event_element(&ev) else { return };
        if !target.class_list().contains("editable") {
            return;
        }
        let Some(id) = row_id(&target) else { return };
        let current = store
            .todos()
            .read_untracked()
            .iter()
            .find(|todo| todo.id == id)
            .map(|todo| todo.text.clone());
        let Some(current) = current else { return };
        let typed = target.text_content().unwrap_or_default();
        match edit_action(&current, &typed) {
            EditAction::Restore => store_refresh(&store),
            EditAction::Skip => {}
            EditAction::Edit(text) => on_edit.run((id, text)),
        }
    };

    // Keyed on the store revision: every write remounts all rows.
    view! {
        <ul class="todo-list" on:click=on_click on:change=on_change on:focusout=on_focusout>
            <For
                each=move || [store.revision().get()]
                key=|rev| *rev
                children=move |_| {
                    display_rows(&store.todos().get_untracked())
                        .into_iter()
                        .map(|row| match row {
                            DisplayRow::Placeholder(text) => view! { <p>{text}</p> }.into_any(),
                            DisplayRow::Todo { id, text, struck } => {
                                view! { <TodoRow id=id text=text struck=struck /> }.into_any()
                            }
                        })
                        .collect_view()
                }
            />
        </ul>
    }
}
