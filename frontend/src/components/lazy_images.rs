//! Lazy image fade-in.

use std::rc::Rc;

use crate::dom::{Dom, DomEvent, EventKind, EventTarget};

const LAZY_IMAGES: &str = r#"img[loading="lazy"]"#;
const LOADED_CLASS: &str = "loaded";

/// Fade-in hook for natively lazy-loaded images.
pub struct LazyImages;

impl LazyImages {
    /// Mark finished images as `loaded` now and the rest when they load.
    /// Returns how many images are still pending.
    pub fn init<D: Dom>(dom: &Rc<D>) -> usize {
        let mut pending = 0;
        for img in dom.query_all(LAZY_IMAGES) {
            if dom.image_complete(&img) {
                dom.add_class(&img, LOADED_CLASS);
                continue;
            }
            pending += 1;
            let dom_ref = dom.clone();
            let target = img.clone();
            dom.listen(
                EventTarget::Node(img),
                EventKind::Load,
                Box::new(move |_: &DomEvent<D::Node>| dom_ref.add_class(&target, LOADED_CLASS)),
            );
        }
        pending
    }
}
