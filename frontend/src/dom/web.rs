//! [`Dom`] over the live browser document.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    AddEventListenerOptions, Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement,
    KeyboardEvent, TouchEvent, Window,
};

use super::{Dom, DomEvent, EventKind, EventTarget, Handler, Modifiers};

/// Browser document and window.
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Bind to the global `window`; `None` outside a browser page.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// The bound window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn event_target(&self, target: &EventTarget<Element>) -> web_sys::EventTarget {
        match target {
            EventTarget::Window => self.window.clone().unchecked_into(),
            EventTarget::Document => self.document.clone().unchecked_into(),
            EventTarget::Node(el) => el.clone().unchecked_into(),
        }
    }
}

fn to_dom_event(kind: EventKind, event: &web_sys::Event) -> DomEvent<Element> {
    let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
    let mut out = DomEvent::new(kind, target);
    if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
        out.key = Some(key_event.key());
        out.modifiers = Modifiers {
            ctrl: key_event.ctrl_key(),
            meta: key_event.meta_key(),
        };
    }
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        out.screen_x = touch_event
            .changed_touches()
            .get(0)
            .map(|touch| f64::from(touch.screen_x()));
    }
    out
}

impl Dom for WebDom {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        node_list(self.document.query_selector_all(selector).ok())
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        node_list(scope.query_selector_all(selector).ok())
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        let _ = parent.append_child(child);
    }

    fn clear_children(&self, node: &Element) {
        while let Some(child) = node.first_child() {
            let _ = node.remove_child(&child);
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let style = el.style();
            if value.is_empty() {
                let _ = style.remove_property(property);
            } else {
                let _ = style.set_property(property, value);
            }
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn image_complete(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlImageElement>()
            .is_some_and(HtmlImageElement::complete)
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn base_url(&self) -> String {
        self.document
            .base_uri()
            .ok()
            .flatten()
            .unwrap_or_else(|| self.location_href())
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn listen(&self, target: EventTarget<Element>, kind: EventKind, mut handler: Handler<Element>) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let dom_event = to_dom_event(kind, &event);
            handler(&dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });

        let js_target = self.event_target(&target);
        let callback = closure.as_ref().unchecked_ref();
        let _ = if kind.is_passive() {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            js_target.add_event_listener_with_callback_and_add_event_listener_options(
                kind.as_str(),
                callback,
                &options,
            )
        } else {
            js_target.add_event_listener_with_callback(kind.as_str(), callback)
        };

        // Listeners live as long as the page.
        closure.forget();
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(move || callback());
        let _ = self
            .window
            .request_animation_frame(closure.unchecked_ref());
    }
}

fn node_list(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
