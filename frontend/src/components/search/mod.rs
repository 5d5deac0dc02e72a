//! Search overlay backed by the content API.

use std::{cell::RefCell, rc::Rc};

use crate::{
    api::ContentApi,
    components::set_scroll_locked,
    config::{SEARCH_DEBOUNCE_MS, SEARCH_MIN_QUERY_CHARS},
    dom::{Dom, DomEvent, EventKind, EventTarget},
    i18n::current::search as t,
    scheduler::Scheduler,
};

pub mod render;

const TOGGLE: &str = ".search-toggle";
const OVERLAY: &str = ".search-overlay";
const CLOSE: &str = ".search-close";
const INPUT: &str = ".search-input";
const RESULTS: &str = ".search-results";
const OPEN_CLASS: &str = "is-open";

/// Full-screen search panel.
///
/// Without a [`ContentApi`] the overlay still opens and closes but only ever
/// shows the setup instructions.
pub struct Search<D: Dom, S: Scheduler> {
    dom: Rc<D>,
    scheduler: Rc<S>,
    api: Option<Rc<dyn ContentApi>>,
    overlay: D::Node,
    input: Option<D::Node>,
    results: Option<D::Node>,
    pending: RefCell<Option<S::Timer>>,
}

impl<D: Dom, S: Scheduler> Search<D, S> {
    /// Mount on `.search-toggle` + `.search-overlay`; `None` if either is
    /// missing. `api` is `None` when no endpoint/key is configured.
    pub fn init(dom: Rc<D>, scheduler: Rc<S>, api: Option<Rc<dyn ContentApi>>) -> Option<Rc<Self>> {
        let toggle = dom.query(TOGGLE)?;
        let overlay = dom.query(OVERLAY)?;
        let close_button = dom.query(CLOSE);
        let search = Rc::new(Self {
            input: dom.query(INPUT),
            results: dom.query(RESULTS),
            overlay,
            scheduler,
            api,
            pending: RefCell::new(None),
            dom,
        });

        {
            let s = search.clone();
            search.dom.listen(
                EventTarget::Node(toggle),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| s.open()),
            );
        }

        if let Some(close_button) = close_button {
            let s = search.clone();
            search.dom.listen(
                EventTarget::Node(close_button),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| s.close()),
            );
        }

        // Backdrop click: only when the overlay itself, not the panel, is hit.
        {
            let s = search.clone();
            search.dom.listen(
                EventTarget::Node(search.overlay.clone()),
                EventKind::Click,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if event.target.as_ref() == Some(&s.overlay) {
                        s.close();
                    }
                }),
            );
        }

        {
            let s = search.clone();
            search.dom.listen(
                EventTarget::Document,
                EventKind::KeyDown,
                Box::new(move |event: &DomEvent<D::Node>| {
                    let shortcut = event.modifiers.ctrl || event.modifiers.meta;
                    if shortcut && event.is_key("k") {
                        event.prevent_default();
                        s.open();
                    }
                    if event.is_key("Escape") && s.is_open() {
                        s.close();
                    }
                }),
            );
        }

        if search.api.is_some() {
            if let Some(input) = search.input.clone() {
                let s = search.clone();
                search.dom.listen(
                    EventTarget::Node(input),
                    EventKind::Input,
                    Box::new(move |_: &DomEvent<D::Node>| s.on_input()),
                );
            }
        }

        Some(search)
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.dom.has_class(&self.overlay, OPEN_CLASS)
    }

    /// Whether search requests can be made.
    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    /// Whether the latest keystroke scheduled a query. Short input and
    /// [`Search::close`] clear it; the handle of a fired timer is kept until
    /// the next keystroke.
    pub fn has_pending_query(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Show the overlay and focus the input.
    pub fn open(&self) {
        self.dom.add_class(&self.overlay, OPEN_CLASS);
        if let Some(input) = &self.input {
            self.dom.focus(input);
        }
        set_scroll_locked(self.dom.as_ref(), true);

        if !self.is_configured() {
            let empty = self
                .input
                .as_ref()
                .map_or(true, |input| self.dom.value(input).is_empty());
            if let (true, Some(results)) = (empty, &self.results) {
                render::show_setup(self.dom.as_ref(), results);
            }
        }
    }

    /// Hide the overlay, empty the input and drop rendered results.
    ///
    /// A query still waiting on its debounce timer is dropped too. A request
    /// already in flight is not cancelled and renders when it completes.
    pub fn close(&self) {
        self.dom.remove_class(&self.overlay, OPEN_CLASS);
        set_scroll_locked(self.dom.as_ref(), false);
        self.pending.borrow_mut().take();
        if let Some(input) = &self.input {
            self.dom.set_value(input, "");
        }
        if let Some(results) = &self.results {
            render::clear(self.dom.as_ref(), results);
        }
    }

    fn on_input(self: &Rc<Self>) {
        // Dropping the previous handle cancels its timer.
        self.pending.borrow_mut().take();

        let (Some(input), Some(results)) = (&self.input, &self.results) else {
            return;
        };
        let query = self.dom.value(input).trim().to_string();

        if query.chars().count() < SEARCH_MIN_QUERY_CHARS {
            render::clear(self.dom.as_ref(), results);
            return;
        }

        render::show_message(self.dom.as_ref(), results, t::SEARCHING, "search-loading");

        let search = self.clone();
        let timer = self.scheduler.schedule(
            SEARCH_DEBOUNCE_MS,
            Box::new(move || search.perform_search(query)),
        );
        *self.pending.borrow_mut() = Some(timer);
    }

    fn perform_search(self: &Rc<Self>, query: String) {
        let Some(api) = self.api.clone() else {
            return;
        };
        let search = self.clone();
        self.scheduler.spawn(Box::pin(async move {
            let outcome = api.search_posts(&query).await;
            let Some(results) = &search.results else {
                return;
            };
            match outcome {
                Ok(posts) => render::render_results(search.dom.as_ref(), results, &posts, &query),
                Err(err) => {
                    log::error!("Search error: {err}");
                    render::show_message(search.dom.as_ref(), results, t::UNAVAILABLE, "search-error");
                },
            }
        }));
    }
}
