//! Header scroll state.

use std::{cell::Cell, rc::Rc};

use crate::{
    config::STICKY_HEADER_OFFSET_PX,
    dom::{Dom, DomEvent, EventKind, EventTarget},
};

const HEADER: &str = ".site-header";
const SCROLLED_CLASS: &str = "scrolled";

/// Frosted-glass header state, updated at most once per animation frame.
pub struct StickyHeader<D: Dom> {
    dom: Rc<D>,
    header: D::Node,
    frame_requested: Cell<bool>,
}

impl<D: Dom> StickyHeader<D> {
    /// Mount on `.site-header` and apply the current scroll state.
    pub fn init(dom: Rc<D>) -> Option<Rc<Self>> {
        let header = dom.query(HEADER)?;
        let sticky = Rc::new(Self {
            dom,
            header,
            frame_requested: Cell::new(false),
        });

        {
            let sticky_ref = sticky.clone();
            sticky.dom.listen(
                EventTarget::Window,
                EventKind::Scroll,
                Box::new(move |_: &DomEvent<D::Node>| sticky_ref.on_scroll()),
            );
        }

        sticky.update();
        Some(sticky)
    }

    /// Whether the header is in its scrolled state.
    pub fn is_scrolled(&self) -> bool {
        self.dom.has_class(&self.header, SCROLLED_CLASS)
    }

    fn on_scroll(self: &Rc<Self>) {
        if self.frame_requested.replace(true) {
            return;
        }
        let sticky = self.clone();
        self.dom.request_animation_frame(Box::new(move || {
            sticky.update();
            sticky.frame_requested.set(false);
        }));
    }

    fn update(&self) {
        let scrolled = self.dom.scroll_y() > STICKY_HEADER_OFFSET_PX;
        self.dom.toggle_class(&self.header, SCROLLED_CLASS, scrolled);
    }
}
