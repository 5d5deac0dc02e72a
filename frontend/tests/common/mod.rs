#![allow(dead_code, reason = "each test binary uses a different subset of the fixtures")]

use std::{cell::RefCell, rc::Rc};

use bearded_frontend::{
    api::{ContentApi, SearchError},
    dom::memory::{MemoryDom, NodeId},
    models::Post,
};
use futures::{channel::oneshot, future::LocalBoxFuture};

pub const PAGE_URL: &str = "https://commentary.example/romans-1/";

pub fn new_dom() -> Rc<MemoryDom> {
    Rc::new(MemoryDom::new(PAGE_URL))
}

pub fn post(title: &str, excerpt: Option<&str>, image: Option<&str>) -> Post {
    let slug = title.to_lowercase().replace(' ', "-");
    Post {
        title: title.to_string(),
        url: format!("https://commentary.example/{slug}/"),
        excerpt: excerpt.map(str::to_string),
        feature_image: image.map(str::to_string),
        published_at: Some("2024-05-02T09:00:00.000Z".to_string()),
    }
}

/// Search overlay markup as the theme renders it.
pub struct SearchHooks {
    pub toggle: NodeId,
    pub overlay: NodeId,
    pub panel: NodeId,
    pub close: NodeId,
    pub input: NodeId,
    pub results: NodeId,
}

pub fn search_markup(dom: &MemoryDom) -> SearchHooks {
    let body = dom.body_node();
    let header = dom.insert(body, "header", &[("class", "site-header")]);
    let toggle = dom.insert(header, "button", &[("class", "search-toggle")]);
    let overlay = dom.insert(body, "div", &[("class", "search-overlay")]);
    let panel = dom.insert(overlay, "div", &[("class", "search-panel")]);
    let close = dom.insert(panel, "button", &[("class", "search-close")]);
    let input = dom.insert(panel, "input", &[("class", "search-input"), ("type", "search")]);
    let results = dom.insert(panel, "div", &[("class", "search-results")]);
    SearchHooks {
        toggle,
        overlay,
        panel,
        close,
        input,
        results,
    }
}

/// Carousel markup with `slides` slides and matching dots.
pub struct CarouselHooks {
    pub root: NodeId,
    pub track: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
    pub dots: Vec<NodeId>,
}

pub fn carousel_markup(dom: &MemoryDom, slides: usize) -> CarouselHooks {
    let body = dom.body_node();
    let root = dom.insert(body, "section", &[("class", "featured-carousel"), ("tabindex", "0")]);
    let track = dom.insert(root, "div", &[("class", "featured-carousel-track")]);
    for i in 0..slides {
        dom.insert_text(track, "article", &[("class", "featured-post")], &format!("Slide {i}"));
    }
    let prev = dom.insert(root, "button", &[("class", "carousel-btn carousel-btn-prev")]);
    let next = dom.insert(root, "button", &[("class", "carousel-btn carousel-btn-next")]);
    let nav = dom.insert(root, "div", &[("class", "carousel-dots")]);
    let dots = (0..slides)
        .map(|_| dom.insert(nav, "button", &[("class", "carousel-dot")]))
        .collect();
    CarouselHooks {
        root,
        track,
        prev,
        next,
        dots,
    }
}

enum Reply {
    Posts(Vec<Post>),
    Fail(SearchError),
    Deferred,
}

type PendingReply = oneshot::Sender<Result<Vec<Post>, SearchError>>;

/// Content API double that records every query it receives.
pub struct FakeApi {
    calls: RefCell<Vec<String>>,
    reply: Reply,
    deferred: RefCell<Vec<PendingReply>>,
}

impl FakeApi {
    pub fn returning(posts: Vec<Post>) -> Rc<Self> {
        Self::with(Reply::Posts(posts))
    }

    pub fn failing(err: SearchError) -> Rc<Self> {
        Self::with(Reply::Fail(err))
    }

    /// Requests stay in flight until [`FakeApi::resolve`] is called.
    pub fn deferred() -> Rc<Self> {
        Self::with(Reply::Deferred)
    }

    fn with(reply: Reply) -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            reply,
            deferred: RefCell::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Complete the `index`-th deferred request.
    pub fn resolve(&self, index: usize, posts: Vec<Post>) {
        let sender = {
            let mut deferred = self.deferred.borrow_mut();
            let (tx, _rx) = oneshot::channel();
            std::mem::replace(&mut deferred[index], tx)
        };
        sender.send(Ok(posts)).expect("search task still waiting");
    }
}

impl ContentApi for FakeApi {
    fn search_posts(&self, query: &str) -> LocalBoxFuture<'static, Result<Vec<Post>, SearchError>> {
        self.calls.borrow_mut().push(query.to_string());
        match &self.reply {
            Reply::Posts(posts) => Box::pin(futures::future::ready(Ok(posts.clone()))),
            Reply::Fail(err) => Box::pin(futures::future::ready(Err(err.clone()))),
            Reply::Deferred => {
                let (tx, rx) = oneshot::channel();
                self.deferred.borrow_mut().push(tx);
                Box::pin(async move {
                    rx.await
                        .unwrap_or_else(|_| Err(SearchError::Network("request dropped".to_string())))
                })
            },
        }
    }
}
