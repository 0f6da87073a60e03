//! Todo Row Component
//!
//! A single `<li>` in the todo list. Events bubble to the list container.

use leptos::prelude::*;

#[component]
pub fn TodoRow(
    id: u32,
    text: String,
    struck: bool,
) -> impl IntoView {
    view! {
        <li id=id.to_string()>
            <input type="checkbox" prop:checked=struck />
            <span class="editable" contenteditable="true">
                {if struck {
                    view! { <s>{text}</s> }.into_any()
                } else {
                    text.into_any()
                }}
            </span>
            <button class="delete">"Delete"</button>
        </li>
    }
}
