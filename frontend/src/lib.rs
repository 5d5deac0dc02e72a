//! Client-side behaviour for The Bearded Commentary theme.
//!
//! Every widget is a leaf: it looks up its markup hooks once, attaches its
//! listeners and never talks to another widget. The document, timers and the
//! content API are injected ([`dom::Dom`], [`scheduler::Scheduler`],
//! [`api::ContentApi`]) so the same code runs against the browser and against
//! the in-memory document used by the tests.

use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod dom;
pub mod i18n;
pub mod models;
pub mod scheduler;

use crate::{
    api::{ContentApi, GhostContentApi},
    config::SearchConfig,
    dom::web::WebDom,
    scheduler::WebScheduler,
};

/// Browser entry point: mount every widget once the document is parsed.
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(config::LOG_LEVEL);

    let Some(dom) = WebDom::from_window() else {
        log::warn!("No browser window; theme scripts not started");
        return;
    };

    let config = SearchConfig::from_global(dom.window().as_ref());
    let api: Option<Rc<dyn ContentApi>> = if cfg!(feature = "mock") || config.is_configured() {
        Some(Rc::new(GhostContentApi::new(config)))
    } else {
        log::info!("Content API key not configured; search shows setup instructions");
        None
    };

    let dom = Rc::new(dom);
    let document = dom.window().document();
    let still_loading = document
        .as_ref()
        .is_some_and(|doc| doc.ready_state() == "loading");

    if let (true, Some(document)) = (still_loading, document) {
        let on_ready = Closure::once_into_js(move || {
            app::mount(dom, Rc::new(WebScheduler), api);
        });
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        app::mount(dom, Rc::new(WebScheduler), api);
    }
}
