//! Off-site link hardening.

use url::Url;

use crate::dom::Dom;

const CONTENT_LINKS: &str = ".post-content a, .page-content a";

/// Opens off-site links from post and page bodies in a new tab without
/// handing the opener to the target.
pub struct ExternalLinks;

impl ExternalLinks {
    /// Harden every off-site content link; returns how many were changed.
    pub fn init<D: Dom>(dom: &D) -> usize {
        let base = dom.base_url();
        let page = dom.location_href();
        let mut hardened = 0;
        for link in dom.query_all(CONTENT_LINKS) {
            let Some(href) = dom.attribute(&link, "href") else {
                continue;
            };
            if is_external(&href, &base, &page) {
                dom.set_attribute(&link, "target", "_blank");
                dom.set_attribute(&link, "rel", "noopener noreferrer");
                hardened += 1;
            }
        }
        hardened
    }
}

/// `host[:port]` as `HTMLAnchorElement.host` reports it: default ports are
/// omitted and URLs without a host yield `None`.
fn host_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Whether `href`, resolved against the document `base` URL, points at a
/// host other than the one serving `page`.
///
/// Links without a host (`mailto:`, `javascript:`) and unparsable hrefs are
/// not external.
pub fn is_external(href: &str, base: &str, page: &str) -> bool {
    let Ok(base) = Url::parse(base) else {
        return false;
    };
    let Ok(target) = base.join(href.trim()) else {
        return false;
    };
    let page_host = Url::parse(page).ok().and_then(|page| host_of(&page));
    match (host_of(&target), page_host) {
        (Some(target_host), Some(page_host)) => target_host != page_host,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://commentary.example/romans-1/";

    fn external(href: &str) -> bool {
        is_external(href, PAGE, PAGE)
    }

    #[test]
    fn other_hosts_are_external() {
        assert!(external("https://www.esv.org/Romans+1/"));
        assert!(external("//cdn.example.net/a.pdf"));
        assert!(external("https://commentary.example:8443/"));
    }

    #[test]
    fn same_host_and_relative_links_are_internal() {
        assert!(!external("/romans-2/"));
        assert!(!external("#fn1"));
        assert!(!external("https://commentary.example:443/tag/paul/"));
        assert!(!external("HTTPS://Commentary.Example/about/"));
    }

    #[test]
    fn hostless_and_broken_links_are_left_alone() {
        assert!(!external("mailto:editor@commentary.example"));
        assert!(!external("http://[::1"));
        assert!(!is_external("/anything", "not a url", "not a url"));
    }

    #[test]
    fn relative_links_resolve_against_the_base_url() {
        let base = "https://mirror.example/archive/";
        assert!(is_external("/romans-2/", base, PAGE));
        assert!(is_external("notes.html", base, PAGE));
        assert!(!is_external("https://commentary.example/about/", base, PAGE));
    }
}
