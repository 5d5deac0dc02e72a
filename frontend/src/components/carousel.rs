//! Featured posts carousel.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::{
    config::CAROUSEL_SWIPE_THRESHOLD_PX,
    dom::{Dom, DomEvent, EventKind, EventTarget},
};

const CAROUSEL: &str = ".featured-carousel";
const TRACK: &str = ".featured-carousel-track";
const SLIDES: &str = ".featured-post";
const PREV: &str = ".carousel-btn-prev";
const NEXT: &str = ".carousel-btn-next";
const DOTS: &str = ".carousel-dot";
const ACTIVE_CLASS: &str = "active";

/// Current slide of a fixed-size carousel. No wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideIndex {
    current: usize,
    total: usize,
}

impl SlideIndex {
    /// First slide of `total`.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Zero-based current slide.
    pub fn current(self) -> usize {
        self.current
    }

    /// Number of slides.
    pub fn total(self) -> usize {
        self.total
    }

    /// Move to `target`, clamped into `[0, total - 1]`.
    pub fn go_to(&mut self, target: isize) {
        let last = self.total.saturating_sub(1);
        self.current = usize::try_from(target).map_or(0, |t| t.min(last));
    }

    /// One slide back, stopping at the first.
    pub fn prev(&mut self) {
        self.go_to(self.offset(-1));
    }

    /// One slide forward, stopping at the last.
    pub fn next(&mut self) {
        self.go_to(self.offset(1));
    }

    /// At the first slide.
    pub fn at_start(self) -> bool {
        self.current == 0
    }

    /// At the last slide.
    pub fn at_end(self) -> bool {
        self.current + 1 >= self.total
    }

    fn offset(self, delta: isize) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX).saturating_add(delta)
    }
}

/// Direction of a recognised swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next slide.
    Left,
    /// Finger moved right: show the previous slide.
    Right,
}

/// Classify a gesture from its start and end `screenX`.
pub fn classify_swipe(start_x: f64, end_x: f64) -> Option<Swipe> {
    let diff = start_x - end_x;
    if diff.abs() <= CAROUSEL_SWIPE_THRESHOLD_PX {
        None
    } else if diff > 0.0 {
        Some(Swipe::Left)
    } else {
        Some(Swipe::Right)
    }
}

/// Featured posts slider.
pub struct FeaturedCarousel<D: Dom> {
    dom: Rc<D>,
    track: D::Node,
    prev_button: Option<D::Node>,
    next_button: Option<D::Node>,
    dots: Vec<D::Node>,
    index: RefCell<SlideIndex>,
    touch_start_x: Cell<f64>,
}

impl<D: Dom> FeaturedCarousel<D> {
    /// Mount on `.featured-carousel`. `None` without a track or with fewer
    /// than two slides.
    pub fn init(dom: Rc<D>) -> Option<Rc<Self>> {
        let root = dom.query(CAROUSEL)?;
        let track = dom.query_in(&root, TRACK)?;
        let total = dom.query_all_in(&root, SLIDES).len();
        if total <= 1 {
            return None;
        }

        let carousel = Rc::new(Self {
            prev_button: dom.query_in(&root, PREV),
            next_button: dom.query_in(&root, NEXT),
            dots: dom.query_all_in(&root, DOTS),
            track,
            index: RefCell::new(SlideIndex::new(total)),
            touch_start_x: Cell::new(0.0),
            dom,
        });

        if let Some(prev) = carousel.prev_button.clone() {
            let c = carousel.clone();
            carousel.dom.listen(
                EventTarget::Node(prev),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| c.step(SlideIndex::prev)),
            );
        }
        if let Some(next) = carousel.next_button.clone() {
            let c = carousel.clone();
            carousel.dom.listen(
                EventTarget::Node(next),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| c.step(SlideIndex::next)),
            );
        }

        for (i, dot) in carousel.dots.iter().enumerate() {
            let c = carousel.clone();
            let target = isize::try_from(i).unwrap_or(isize::MAX);
            carousel.dom.listen(
                EventTarget::Node(dot.clone()),
                EventKind::Click,
                Box::new(move |_: &DomEvent<D::Node>| c.go_to(target)),
            );
        }

        {
            let c = carousel.clone();
            carousel.dom.listen(
                EventTarget::Node(root),
                EventKind::KeyDown,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if event.is_key("ArrowLeft") {
                        c.step(SlideIndex::prev);
                    } else if event.is_key("ArrowRight") {
                        c.step(SlideIndex::next);
                    }
                }),
            );
        }

        {
            let c = carousel.clone();
            carousel.dom.listen(
                EventTarget::Node(carousel.track.clone()),
                EventKind::TouchStart,
                Box::new(move |event: &DomEvent<D::Node>| {
                    if let Some(x) = event.screen_x {
                        c.touch_start_x.set(x);
                    }
                }),
            );
        }
        {
            let c = carousel.clone();
            carousel.dom.listen(
                EventTarget::Node(carousel.track.clone()),
                EventKind::TouchEnd,
                Box::new(move |event: &DomEvent<D::Node>| {
                    let Some(end_x) = event.screen_x else {
                        return;
                    };
                    match classify_swipe(c.touch_start_x.get(), end_x) {
                        Some(Swipe::Left) => c.step(SlideIndex::next),
                        Some(Swipe::Right) => c.step(SlideIndex::prev),
                        None => {},
                    }
                }),
            );
        }

        carousel.render();
        Some(carousel)
    }

    /// Zero-based current slide.
    pub fn current_index(&self) -> usize {
        self.index.borrow().current()
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.index.borrow().total()
    }

    /// Show slide `target` (clamped).
    pub fn go_to(&self, target: isize) {
        self.index.borrow_mut().go_to(target);
        self.render();
    }

    fn step(&self, move_index: fn(&mut SlideIndex)) {
        move_index(&mut self.index.borrow_mut());
        self.render();
    }

    fn render(&self) {
        let index = *self.index.borrow();
        let current = index.current();

        self.dom.set_style(
            &self.track,
            "transform",
            &format!("translateX(-{}%)", current * 100),
        );

        for (i, dot) in self.dots.iter().enumerate() {
            let active = i == current;
            self.dom.toggle_class(dot, ACTIVE_CLASS, active);
            self.dom
                .set_attribute(dot, "aria-selected", if active { "true" } else { "false" });
        }

        if let Some(prev) = &self.prev_button {
            self.dom.set_disabled(prev, index.at_start());
        }
        if let Some(next) = &self.next_button {
            self.dom.set_disabled(next, index.at_end());
        }
    }
}
