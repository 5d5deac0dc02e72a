//! In-memory [`Dom`] used to drive the widgets without a browser.
//!
//! The tree is an arena of [`NodeId`]s rooted at `<html><body>`. Events
//! dispatched on a node bubble through its ancestors, then the document, then
//! the window. Animation frames queue up until [`MemoryDom::run_animation_frames`].

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, VecDeque},
    rc::Rc,
};

use super::{
    selector::{ElementView, SelectorList},
    Dom, DomEvent, EventKind, EventTarget, Handler, Modifiers,
};

/// Element handle into a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    complete: bool,
}

impl ElementView for NodeData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

type SharedHandler = Rc<RefCell<Handler<NodeId>>>;

struct Listener {
    target: EventTarget<NodeId>,
    kind: EventKind,
    handler: SharedHandler,
}

/// Arena-backed document with event dispatch.
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    body: NodeId,
    listeners: RefCell<Vec<Listener>>,
    frames: RefCell<VecDeque<Box<dyn FnOnce()>>>,
    focused: Cell<Option<NodeId>>,
    location: String,
    base_url: RefCell<Option<String>>,
    viewport_width: Cell<f64>,
    scroll_y: Cell<f64>,
}

impl MemoryDom {
    /// Empty `<html><body></body></html>` served from `location`.
    pub fn new(location: &str) -> Self {
        let html = NodeData {
            tag: "html".to_string(),
            children: vec![NodeId(1)],
            ..NodeData::default()
        };
        let body = NodeData {
            tag: "body".to_string(),
            parent: Some(NodeId(0)),
            ..NodeData::default()
        };
        Self {
            nodes: RefCell::new(vec![html, body]),
            body: NodeId(1),
            listeners: RefCell::new(Vec::new()),
            frames: RefCell::new(VecDeque::new()),
            focused: Cell::new(None),
            location: location.to_string(),
            base_url: RefCell::new(None),
            viewport_width: Cell::new(1280.0),
            scroll_y: Cell::new(0.0),
        }
    }

    /// The `<body>` element.
    pub fn body_node(&self) -> NodeId {
        self.body
    }

    /// Append a new `tag` element with `attrs` under `parent`.
    pub fn insert(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.new_node(tag);
        for (name, value) in attrs {
            self.set_attribute(&node, name, value);
        }
        self.append_child(&parent, &node);
        node
    }

    /// Like [`MemoryDom::insert`], with text content.
    pub fn insert_text(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)], text: &str) -> NodeId {
        let node = self.insert(parent, tag, attrs);
        self.set_text(&node, text);
        node
    }

    /// Direct children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// Tag name of `node`.
    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    /// Inline style property of `node`.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    /// Whether `node` carries the `disabled` attribute.
    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.attribute(&node, "disabled").is_some()
    }

    /// Element that last received focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    /// Mark an image as finished loading without firing `load`.
    pub fn mark_image_complete(&self, node: NodeId) {
        self.nodes.borrow_mut()[node.0].complete = true;
    }

    /// Act as if the page declared `<base href="{url}">` (absolute URL).
    pub fn set_base_url(&self, url: &str) {
        *self.base_url.borrow_mut() = Some(url.to_string());
    }

    /// Resize the viewport; does not fire `resize`.
    pub fn set_viewport_width(&self, width: f64) {
        self.viewport_width.set(width);
    }

    /// Scroll the page; does not fire `scroll`.
    pub fn set_scroll_y(&self, offset: f64) {
        self.scroll_y.set(offset);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of queued animation-frame callbacks.
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Run the callbacks queued so far; returns how many ran.
    pub fn run_animation_frames(&self) -> usize {
        let due: Vec<_> = self.frames.borrow_mut().drain(..).collect();
        let count = due.len();
        for frame in due {
            frame();
        }
        count
    }

    /// Dispatch `event` at `target`, bubbling as the browser would.
    pub fn dispatch(&self, target: EventTarget<NodeId>, event: DomEvent<NodeId>) -> DomEvent<NodeId> {
        let mut path = Vec::new();
        match &target {
            EventTarget::Node(node) => {
                path.push(EventTarget::Node(*node));
                if event.kind != EventKind::Load {
                    path.extend(self.ancestors(*node).into_iter().map(EventTarget::Node));
                    path.push(EventTarget::Document);
                    path.push(EventTarget::Window);
                }
            },
            EventTarget::Document => {
                path.push(EventTarget::Document);
                path.push(EventTarget::Window);
            },
            EventTarget::Window => path.push(EventTarget::Window),
        }

        for step in path {
            let handlers: Vec<SharedHandler> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.kind == event.kind && l.target == step)
                .map(|l| l.handler.clone())
                .collect();
            for handler in handlers {
                (handler.borrow_mut())(&event);
            }
        }
        event
    }

    /// Click on `node`.
    pub fn click(&self, node: NodeId) -> DomEvent<NodeId> {
        self.dispatch(EventTarget::Node(node), DomEvent::new(EventKind::Click, Some(node)))
    }

    /// Key press on `node`, or on the document when `node` is `None`.
    pub fn key_down(&self, node: Option<NodeId>, key: &str, modifiers: Modifiers) -> DomEvent<NodeId> {
        let target = node.map_or(EventTarget::Document, EventTarget::Node);
        self.dispatch(target, DomEvent::key(node, key, modifiers))
    }

    /// Type `value` into `input` and fire `input`.
    pub fn type_into(&self, input: NodeId, value: &str) {
        self.set_value(&input, value);
        self.dispatch(EventTarget::Node(input), DomEvent::new(EventKind::Input, Some(input)));
    }

    /// Fire a window-level event such as `scroll` or `resize`.
    pub fn fire_window(&self, kind: EventKind) {
        self.dispatch(EventTarget::Window, DomEvent::new(kind, None));
    }

    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut cursor = nodes[node.0].parent;
        while let Some(parent) = cursor {
            out.push(parent);
            cursor = nodes[parent.0].parent;
        }
        out
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn select(&self, scope: NodeId, selector: &str, first_only: bool) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        let candidates = self.descendants(scope);
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        for node in candidates {
            let ancestors: Vec<&NodeData> = {
                let mut chain = Vec::new();
                let mut cursor = nodes[node.0].parent;
                while let Some(parent) = cursor {
                    chain.push(&nodes[parent.0]);
                    cursor = nodes[parent.0].parent;
                }
                chain
            };
            if list.matches(&nodes[node.0], ancestors.iter().copied()) {
                out.push(node);
                if first_only {
                    break;
                }
            }
        }
        out
    }

    fn collect_text(nodes: &[NodeData], node: NodeId, out: &mut String) {
        out.push_str(&nodes[node.0].text);
        for child in &nodes[node.0].children {
            Self::collect_text(nodes, *child, out);
        }
    }

    fn new_node(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        NodeId(nodes.len() - 1)
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root(), selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root(), selector, false)
    }

    fn query_in(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(*scope, selector, true).into_iter().next()
    }

    fn query_all_in(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*scope, selector, false)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|node| {
            self.nodes.borrow()[node.0].attributes.get("id").map(String::as_str) == Some(id)
        })
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        ancestor == node || self.ancestors(*node).contains(ancestor)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_node(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(old_parent) = nodes[child.0].parent.take() {
            nodes[old_parent.0].children.retain(|c| c != child);
        }
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
    }

    fn clear_children(&self, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[node.0].children);
        for child in children {
            nodes[child.0].parent = None;
        }
        nodes[node.0].text.clear();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.nodes.borrow_mut()[node.0].attributes.remove(name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0]
            .attributes
            .get("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let list = nodes[node.0].attributes.entry("class".to_string()).or_default();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(list) = nodes[node.0].attributes.get_mut("class") {
            *list = list
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        if value.is_empty() {
            nodes[node.0].style.remove(property);
        } else {
            nodes[node.0]
                .style
                .insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: &NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        Self::collect_text(&nodes, *node, &mut out);
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.clear_children(node);
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].value = value.to_string();
    }

    fn focus(&self, node: &NodeId) {
        self.focused.set(Some(*node));
    }

    fn image_complete(&self, node: &NodeId) -> bool {
        self.nodes.borrow()[node.0].complete
    }

    fn location_href(&self) -> String {
        self.location.clone()
    }

    fn base_url(&self) -> String {
        self.base_url
            .borrow()
            .clone()
            .unwrap_or_else(|| self.location.clone())
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn listen(&self, target: EventTarget<NodeId>, kind: EventKind, handler: Handler<NodeId>) {
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
    }

    fn request_animation_frame(&self, callback: Box<dyn FnOnce()>) {
        self.frames.borrow_mut().push_back(callback);
    }
}
