//! Footnote tooltips.

use crate::dom::Dom;

const FOOTNOTE_REFS: &str = r##"sup a[href^="#fn"]"##;

/// Shows footnote text as a native tooltip on its reference mark.
pub struct Footnotes;

impl Footnotes {
    /// Copy each footnote's text into its reference's `title`; returns how
    /// many references were annotated.
    pub fn init<D: Dom>(dom: &D) -> usize {
        let mut annotated = 0;
        for reference in dom.query_all(FOOTNOTE_REFS) {
            let Some(id) = dom
                .attribute(&reference, "href")
                .and_then(|href| href.strip_prefix('#').map(str::to_string))
            else {
                continue;
            };
            if let Some(footnote) = dom.element_by_id(&id) {
                dom.set_attribute(&reference, "title", dom.text(&footnote).trim());
                annotated += 1;
            }
        }
        annotated
    }
}
