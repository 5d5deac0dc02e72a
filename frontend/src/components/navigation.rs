//! Mobile navigation menu.

use std::rc::Rc;

use crate::{
    components::set_scroll_locked,
    config::NAV_BREAKPOINT_PX,
    dom::{Dom, DomEvent, EventKind, EventTarget},
};

const TOGGLE: &str = ".nav-toggle";
const MENU: &str = ".nav-menu";
const OPEN_CLASS: &str = "is-open";

/// Mobile menu toggle.
///
/// Open state lives in the DOM (`is-open` on the menu, `aria-expanded` on
/// the toggle) so server-rendered markup and the widget always agree.
pub struct Navigation<D: Dom> {
    dom: Rc<D>,
    toggle: D::Node,
    menu: D::Node,
}

impl<D: Dom> Navigation<D> {
    /// Mount on `.nav-toggle` + `.nav-menu`; `None` if either is missing.
    pub fn init(dom: Rc<D>) -> Option<Rc<Self>> {
        let toggle = dom.query(TOGGLE)?;
        let menu = dom.query(MENU)?;
        let nav = Rc::new(Self { dom, toggle, menu });

        {
            let nav_ref = nav.clone();
            nav.dom.listen(
                EventTarget::Node(nav.toggle.clone()),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| nav_ref.toggle()),
            );
        }

        // Outside click.
        {
            let nav_ref = nav.clone();
            nav.dom.listen(
                EventTarget::Document,
                EventKind::Click,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if !nav_ref.is_open() {
                        return;
                    }
                    let inside = event.target.as_ref().is_some_and(|target| {
                        nav_ref.dom.contains(&nav_ref.menu, target)
                            || nav_ref.dom.contains(&nav_ref.toggle, target)
                    });
                    if !inside {
                        nav_ref.close();
                    }
                }),
            );
        }

        {
            let nav_ref = nav.clone();
            nav.dom.listen(
                EventTarget::Document,
                EventKind::KeyDown,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if event.is_key("Escape") && nav_ref.is_open() {
                        nav_ref.close();
                        nav_ref.dom.focus(&nav_ref.toggle);
                    }
                }),
            );
        }

        {
            let nav_ref = nav.clone();
            nav.dom.listen(
                EventTarget::Window,
                EventKind::Resize,
                Box::new(move |_: &DomEvent<D::Node>| {
                    if nav_ref.dom.viewport_width() > NAV_BREAKPOINT_PX && nav_ref.is_open() {
                        nav_ref.close();
                    }
                }),
            );
        }

        Some(nav)
    }

    /// Whether the menu is currently shown.
    pub fn is_open(&self) -> bool {
        self.dom.has_class(&self.menu, OPEN_CLASS)
    }

    /// Flip the menu state, as the toggle button does.
    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    /// Close the menu.
    pub fn close(&self) {
        self.set_open(false);
    }

    fn set_open(&self, open: bool) {
        self.dom
            .set_attribute(&self.toggle, "aria-expanded", if open { "true" } else { "false" });
        self.dom.toggle_class(&self.menu, OPEN_CLASS, open);
        set_scroll_locked(self.dom.as_ref(), open);
    }
}
