//! DOM output of the search overlay.

use crate::{
    config::SEARCH_EXCERPT_MAX_CHARS,
    dom::Dom,
    i18n::{current::search as t, fill_one},
    models::Post,
};

/// Remove everything from `container`.
pub fn clear<D: Dom>(dom: &D, container: &D::Node) {
    dom.clear_children(container);
}

/// Replace the content of `container` with one `<p class=...>` message.
pub fn show_message<D: Dom>(dom: &D, container: &D::Node, text: &str, class: &str) {
    clear(dom, container);
    if let Some(p) = dom.element_with("p", class, text) {
        dom.append_child(container, &p);
    }
}

/// Instructions shown instead of results when no API key is configured.
pub fn show_setup<D: Dom>(dom: &D, container: &D::Node) {
    clear(dom, container);
    let _ = build_setup(dom, container);
}

fn build_setup<D: Dom>(dom: &D, container: &D::Node) -> Option<()> {
    let message = dom.element_with("div", "search-setup-message", "")?;

    let title = dom.create_element("p")?;
    let strong = dom.element_with("strong", "", t::SETUP_TITLE)?;
    dom.append_child(&title, &strong);

    let intro = dom.element_with("p", "", t::SETUP_INTRO)?;

    let list = dom.create_element("ol")?;
    for step in t::SETUP_STEPS {
        let item = dom.element_with("li", "", step)?;
        dom.append_child(&list, &item);
    }

    dom.append_child(&message, &title);
    dom.append_child(&message, &intro);
    dom.append_child(&message, &list);
    dom.append_child(container, &message);
    Some(())
}

/// Render `posts` as result cards, or the no-results line for `query`.
pub fn render_results<D: Dom>(dom: &D, container: &D::Node, posts: &[Post], query: &str) {
    clear(dom, container);

    if posts.is_empty() {
        show_message(dom, container, &fill_one(t::NO_RESULTS_TEMPLATE, query), "search-no-results");
        return;
    }

    for card in posts.iter().filter_map(|post| result_card(dom, post)) {
        dom.append_child(container, &card);
    }
}

fn result_card<D: Dom>(dom: &D, post: &Post) -> Option<D::Node> {
    let link = dom.element_with("a", "search-result", "")?;
    dom.set_attribute(&link, "href", &post.url);

    match post.feature_image.as_deref().filter(|src| !src.is_empty()) {
        Some(src) => {
            let img = dom.create_element("img")?;
            dom.set_attribute(&img, "src", src);
            dom.set_attribute(&img, "alt", "");
            dom.set_attribute(&img, "loading", "lazy");
            dom.append_child(&link, &img);
        },
        None => {
            let placeholder = dom.element_with("div", "search-result-no-image", "")?;
            dom.append_child(&link, &placeholder);
        },
    }

    let content = dom.element_with("div", "search-result-content", "")?;
    let title = dom.create_element("h4")?;
    dom.set_text(&title, &post.title);
    dom.append_child(&content, &title);

    if let Some(excerpt) = post.excerpt.as_deref().filter(|e| !e.is_empty()) {
        let paragraph = dom.element_with("p", "", &truncate_excerpt(excerpt))?;
        dom.append_child(&content, &paragraph);
    }

    dom.append_child(&link, &content);
    Some(link)
}

/// First [`SEARCH_EXCERPT_MAX_CHARS`] characters of `excerpt`, with `...`
/// appended when something was cut.
pub fn truncate_excerpt(excerpt: &str) -> String {
    match excerpt.char_indices().nth(SEARCH_EXCERPT_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &excerpt[..cut], t::ELLIPSIS),
        None => excerpt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_excerpts_are_kept_verbatim() {
        let exact = "x".repeat(SEARCH_EXCERPT_MAX_CHARS);
        assert_eq!(truncate_excerpt(&exact), exact);
        assert_eq!(truncate_excerpt("brief"), "brief");
    }

    #[test]
    fn long_excerpts_are_cut_on_a_char_boundary() {
        let long = "é".repeat(SEARCH_EXCERPT_MAX_CHARS + 5);
        let cut = truncate_excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SEARCH_EXCERPT_MAX_CHARS + 3);
    }
}
