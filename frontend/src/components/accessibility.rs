//! Keyboard vs. pointer focus styling.

use std::rc::Rc;

use crate::dom::{Dom, DomEvent, EventKind, EventTarget};

const USING_MOUSE_CLASS: &str = "using-mouse";

/// Hides focus rings for pointer users and restores them on `Tab`.
pub struct Accessibility;

impl Accessibility {
    /// Attach the body listeners; `false` when there is no body.
    pub fn init<D: Dom>(dom: &Rc<D>) -> bool {
        let Some(body) = dom.body() else {
            return false;
        };

        {
            let dom_ref = dom.clone();
            let body_ref = body.clone();
            dom.listen(
                EventTarget::Node(body.clone()),
                EventKind::MouseDown,
                Box::new(move |_: &DomEvent<D::Node>| dom_ref.add_class(&body_ref, USING_MOUSE_CLASS)),
            );
        }

        {
            let dom_ref = dom.clone();
            let body_ref = body.clone();
            dom.listen(
                EventTarget::Node(body),
                EventKind::KeyDown,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if event.is_key("Tab") {
                        dom_ref.remove_class(&body_ref, USING_MOUSE_CLASS);
                    }
                }),
            );
        }

        true
    }
}
