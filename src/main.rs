//! Todos Frontend Entry Point

mod models;
mod storage;
mod config;
mod model;
mod render;
mod store;
mod components;
mod app;

use app::App;
use config::{AppConfig, MOUNT_SELECTOR};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// The `#app` element, if the page has one
fn mount_point() -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .query_selector(MOUNT_SELECTOR)
        .ok()
        .flatten()?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = AppConfig::from_document();
    let level = config.level_filter();
    if let Err(e) = console_logger::init(level, console_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger not installed: {}", e).into());
    }
    if let Some(e) = config_error {
        log::error!("{}", e);
    }

    match mount_point() {
        Some(el) => leptos::mount::mount_to(el, move || view! { <App config=config /> }).forget(),
        None => {
            log::warn!("no {} element, mounting to body", MOUNT_SELECTOR);
            mount_to_body(move || view! { <App config=config /> });
        }
    }
}
