//! Todo Form Component
//!
//! Input and submit button for adding todos.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::render::submitted_text;

/// Form for adding todos. Blank input is ignored.
#[component]
pub fn TodoForm(
    #[prop(into)] on_add: Callback<String>,
) -> impl IntoView {
    let (todo_text, set_todo_text) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(text) = submitted_text(&todo_text.get()) else { return };
        on_add.run(text);
        set_todo_text.set(String::new());
    };

    view! {
        <form on:submit=submit>
            <input
                type="text"
                name="todo"
                placeholder="ADD TODO"
                prop:value=move || todo_text.get()
                on:input=move |ev| {
                    let input = ev
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
                    if let Some(input) = input {
                        set_todo_text.set(input.value());
                    }
                }
            />
            <button type="submit">"Submit!"</button>
        </form>
    }
}
