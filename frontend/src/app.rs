//! Page-level wiring of all widgets.

use std::rc::Rc;

use crate::{
    api::ContentApi,
    components::{
        accessibility::Accessibility, carousel::FeaturedCarousel, external_links::ExternalLinks,
        footnotes::Footnotes, lazy_images::LazyImages, navigation::Navigation,
        newsletter::NewsletterForm, search::Search, sticky_header::StickyHeader,
    },
    dom::Dom,
    scheduler::Scheduler,
};

/// Everything [`mount`] attached to the page.
///
/// Stateful widgets are `None` when their markup is missing; the one-shot
/// enhancers report how many elements they touched.
pub struct Widgets<D: Dom, S: Scheduler> {
    /// Mobile menu.
    pub navigation: Option<Rc<Navigation<D>>>,
    /// Search overlay.
    pub search: Option<Rc<Search<D, S>>>,
    /// Scroll-aware header.
    pub sticky_header: Option<Rc<StickyHeader<D>>>,
    /// Members forms given a loading state.
    pub newsletter_forms: usize,
    /// Lazy images still waiting for `load`.
    pub lazy_images_pending: usize,
    /// Content links opened in a new tab.
    pub external_links: usize,
    /// Footnote references given a tooltip.
    pub footnotes: usize,
    /// Whether focus-visibility tracking is attached.
    pub accessibility: bool,
    /// Featured posts slider.
    pub carousel: Option<Rc<FeaturedCarousel<D>>>,
}

/// Initialize every widget against `dom`, in page order.
pub fn mount<D: Dom, S: Scheduler>(
    dom: Rc<D>,
    scheduler: Rc<S>,
    api: Option<Rc<dyn ContentApi>>,
) -> Widgets<D, S> {
    let widgets = Widgets {
        navigation: Navigation::init(dom.clone()),
        search: Search::init(dom.clone(), scheduler, api),
        sticky_header: StickyHeader::init(dom.clone()),
        newsletter_forms: NewsletterForm::init(&dom),
        lazy_images_pending: LazyImages::init(&dom),
        external_links: ExternalLinks::init(dom.as_ref()),
        footnotes: Footnotes::init(dom.as_ref()),
        accessibility: Accessibility::init(&dom),
        carousel: FeaturedCarousel::init(dom),
    };

    log::debug!(
        "mounted: navigation={} search={} sticky_header={} carousel={} forms={} lazy_pending={} external_links={} footnotes={}",
        widgets.navigation.is_some(),
        widgets.search.as_ref().map_or("off", |s| if s.is_configured() { "api" } else { "setup" }),
        widgets.sticky_header.is_some(),
        widgets.carousel.is_some(),
        widgets.newsletter_forms,
        widgets.lazy_images_pending,
        widgets.external_links,
        widgets.footnotes,
    );

    widgets
}
