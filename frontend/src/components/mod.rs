//! Page widgets. Each one mounts itself from `init` and is inert when its
//! markup hooks are missing.

pub mod accessibility;
pub mod carousel;
pub mod external_links;
pub mod footnotes;
pub mod lazy_images;
pub mod navigation;
pub mod newsletter;
pub mod search;
pub mod sticky_header;

use crate::dom::Dom;

/// Lock or release page scrolling behind an open menu or overlay.
pub(crate) fn set_scroll_locked<D: Dom>(dom: &D, locked: bool) {
    if let Some(body) = dom.body() {
        dom.set_style(&body, "overflow", if locked { "hidden" } else { "" });
    }
}
