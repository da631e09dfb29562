//! Cart Sync Frontend Entry Point
//!
//! Attaches to a server-rendered storefront page: binds cart controls and
//! mounts the notice stack.

mod app;
mod client;
mod commands;
mod components;
mod config;
mod context;
mod cookie;
mod dom;
mod error;
mod models;
mod store;
mod view;

use std::rc::Rc;

use app::CartSyncApp;
use config::CartSyncConfig;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Find the notice host or append one to `<body>`
fn notification_host(document: &web_sys::Document, id: &str) -> Option<web_sys::HtmlElement> {
    if let Some(el) = document.get_element_by_id(id) {
        return el.dyn_into::<web_sys::HtmlElement>().ok();
    }
    let host = document.create_element("div").ok()?;
    host.set_id(id);
    document.body()?.append_child(&host).ok()?;
    host.dyn_into::<web_sys::HtmlElement>().ok()
}

fn start() {
    let config = Rc::new(CartSyncConfig::load());
    log::set_max_level(config.log_level().to_level_filter());

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("[CartSync] No document, not starting");
        return;
    };
    let Some(host) = notification_host(&document, &config.notification_host_id) else {
        log::error!("[CartSync] Cannot create notification host '{}'", config.notification_host_id);
        return;
    };

    leptos::mount::mount_to(host, move || view! { <CartSyncApp config=config /> }).forget();
}

fn main() {
    console_error_panic_hook::set_once();
    // Narrowed to the configured level once the config is read
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::error_1(&format!("[CartSync] Logger init failed: {}", e).into());
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::once(start);
        match document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            Ok(()) => on_ready.forget(),
            Err(e) => {
                log::error!("[CartSync] Cannot wait for DOMContentLoaded ({:?}), starting now", e);
                start();
            }
        }
    } else {
        start();
    }
}
