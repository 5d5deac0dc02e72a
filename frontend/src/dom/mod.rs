//! Document access for the widgets.
//!
//! Widgets never touch `web_sys` directly. They talk to a [`Dom`], which is
//! backed by the real browser document in production ([`web::WebDom`]) and by
//! an in-memory tree in tests (`memory::MemoryDom`, built with the
//! `test-support` feature).

use std::cell::Cell;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
#[cfg(any(test, feature = "test-support"))]
mod selector;
pub mod web;

/// Events the widgets subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `click`
    Click,
    /// `keydown`
    KeyDown,
    /// `mousedown`
    MouseDown,
    /// `input`
    Input,
    /// `submit`
    Submit,
    /// `load`
    Load,
    /// `scroll`
    Scroll,
    /// `resize`
    Resize,
    /// `touchstart`
    TouchStart,
    /// `touchend`
    TouchEnd,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::MouseDown => "mousedown",
            Self::Input => "input",
            Self::Submit => "submit",
            Self::Load => "load",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
        }
    }

    /// Touch listeners never call `prevent_default`, so they are registered
    /// as passive.
    pub fn is_passive(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchEnd)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum EventTarget<N> {
    /// The window (`scroll`, `resize`).
    Window,
    /// The document itself.
    Document,
    /// A single element.
    Node(N),
}

/// Keyboard modifier state of a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control key held.
    pub ctrl: bool,
    /// Command / Windows key held.
    pub meta: bool,
}

/// A dispatched event, reduced to the fields the widgets read.
#[derive(Debug)]
pub struct DomEvent<N> {
    /// Event type.
    pub kind: EventKind,
    /// Element the event was dispatched on, if it was an element.
    pub target: Option<N>,
    /// `KeyboardEvent.key` for key events.
    pub key: Option<String>,
    /// Modifier keys for key events.
    pub modifiers: Modifiers,
    /// `screenX` of the first changed touch for touch events.
    pub screen_x: Option<f64>,
    default_prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    /// Plain event of `kind` targeted at `target`.
    pub fn new(kind: EventKind, target: Option<N>) -> Self {
        Self {
            kind,
            target,
            key: None,
            modifiers: Modifiers::default(),
            screen_x: None,
            default_prevented: Cell::new(false),
        }
    }

    /// Key event carrying `key`.
    pub fn key(target: Option<N>, key: &str, modifiers: Modifiers) -> Self {
        Self {
            key: Some(key.to_string()),
            modifiers,
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    /// Touch event whose first changed touch is at `screen_x`.
    pub fn touch(kind: EventKind, target: Option<N>, screen_x: f64) -> Self {
        Self {
            screen_x: Some(screen_x),
            ..Self::new(kind, target)
        }
    }

    /// Whether the key is `key` (exact match on `KeyboardEvent.key`).
    pub fn is_key(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// Cancel the browser default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler asked to cancel the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Boxed event handler.
pub type Handler<N> = Box<dyn FnMut(&DomEvent<N>)>;

/// The document and window surface used by the widgets.
///
/// All methods take `&self`; implementations use interior mutability so a
/// handler can freely mutate the tree while an event is being dispatched.
pub trait Dom: 'static {
    /// Element handle.
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    /// `document.body`.
    fn body(&self) -> Option<Self::Node>;
    /// First element in the document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements in the document matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// All descendants of `scope` matching `selector`.
    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// `document.getElementById`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Detached element with tag `tag`; `None` for an invalid tag name.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Remove every child of `node`.
    fn clear_children(&self, node: &Self::Node);

    /// Attribute value.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Set an attribute.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Remove an attribute.
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    /// `classList.contains`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// `classList.add`.
    fn add_class(&self, node: &Self::Node, class: &str);
    /// `classList.remove`.
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Inline style property; an empty value removes it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// `textContent`.
    fn text(&self, node: &Self::Node) -> String;
    /// Replace the content of `node` with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);
    /// Current value of a form control.
    fn value(&self, node: &Self::Node) -> String;
    /// Set the value of a form control.
    fn set_value(&self, node: &Self::Node, value: &str);
    /// Move keyboard focus to `node`.
    fn focus(&self, node: &Self::Node);
    /// `HTMLImageElement.complete`.
    fn image_complete(&self, node: &Self::Node) -> bool;

    /// `location.href` of the page.
    fn location_href(&self) -> String;
    /// `document.baseURI`, which relative hrefs resolve against. Differs from
    /// [`Dom::location_href`] when the page has a `<base href>`.
    fn base_url(&self) -> String;
    /// `window.innerWidth`.
    fn viewport_width(&self) -> f64;
    /// `window.pageYOffset`.
    fn scroll_y(&self) -> f64;

    /// Register `handler` for `kind` on `target` for the page lifetime.
    fn listen(&self, target: EventTarget<Self::Node>, kind: EventKind, handler: Handler<Self::Node>);
    /// Run `callback` before the next repaint.
    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>);

    /// Toggle `class` so that it is present iff `on`.
    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Set or clear the boolean `disabled` attribute.
    fn set_disabled(&self, node: &Self::Node, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    /// Create `tag`, give it `class` when non-empty and `text` when non-empty.
    fn element_with(&self, tag: &str, class: &str, text: &str) -> Option<Self::Node> {
        let node = self.create_element(tag)?;
        if !class.is_empty() {
            self.set_attribute(&node, "class", class);
        }
        if !text.is_empty() {
            self.set_text(&node, text);
        }
        Some(node)
    }
}
