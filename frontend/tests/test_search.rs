//! Search integration tests.

mod common;

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bearded_frontend::{
        api::{posts_search_url, ContentApi, SearchError},
        components::search::Search,
        config::SearchConfig,
        dom::{
            memory::{MemoryDom, NodeId},
            Dom, Modifiers,
        },
        scheduler::ManualScheduler,
    };

    use crate::common::{new_dom, post, search_markup, FakeApi, SearchHooks};

    struct Harness {
        dom: Rc<MemoryDom>,
        scheduler: Rc<ManualScheduler>,
        hooks: SearchHooks,
        search: Rc<Search<MemoryDom, ManualScheduler>>,
    }

    fn mount(api: Option<Rc<FakeApi>>) -> Harness {
        let dom = new_dom();
        let hooks = search_markup(&dom);
        let scheduler = Rc::new(ManualScheduler::new());
        let api = api.map(|api| api as Rc<dyn ContentApi>);
        let search = Search::init(dom.clone(), scheduler.clone(), api).expect("search hooks present");
        Harness {
            dom,
            scheduler,
            hooks,
            search,
        }
    }

    fn results_text(h: &Harness) -> String {
        h.dom.text(&h.hooks.results)
    }

    fn result_children(h: &Harness) -> Vec<NodeId> {
        h.dom.children(h.hooks.results)
    }

    #[test]
    fn missing_hooks_leave_search_unmounted() {
        let dom = new_dom();
        dom.insert(dom.body_node(), "button", &[("class", "search-toggle")]);
        let scheduler = Rc::new(ManualScheduler::new());
        assert!(Search::init(dom.clone(), scheduler, None).is_none());
        assert_eq!(dom.listener_count(), 0);
    }

    #[test]
    fn short_queries_never_hit_the_network_and_clear_results() {
        let api = FakeApi::returning(vec![post("Grace", None, None)]);
        let h = mount(Some(api.clone()));

        h.dom.click(h.hooks.toggle);
        h.dom.type_into(h.hooks.input, "gr");
        h.scheduler.advance(300);
        assert_eq!(result_children(&h).len(), 1);

        for query in ["g", " g ", "", "   "] {
            h.dom.type_into(h.hooks.input, query);
            assert!(result_children(&h).is_empty(), "results not cleared for {query:?}");
            assert!(!h.search.has_pending_query());
        }
        h.scheduler.advance(1_000);

        assert_eq!(api.calls(), vec!["gr"]);
        assert!(result_children(&h).is_empty());
    }

    #[test]
    fn one_request_fires_after_the_quiet_period() {
        let api = FakeApi::returning(Vec::new());
        let h = mount(Some(api.clone()));

        h.dom.type_into(h.hooks.input, "ghost");
        assert_eq!(results_text(&h), "Searching...");
        h.scheduler.advance(299);
        assert!(api.calls().is_empty());

        h.scheduler.advance(1);
        assert_eq!(api.calls(), vec!["ghost"]);

        let config = SearchConfig::new("https://commentary.example", "key");
        assert!(posts_search_url(&config, &api.calls()[0]).ends_with("&filter=title:~'ghost'"));
    }

    #[test]
    fn keystroke_bursts_collapse_into_the_latest_query() {
        let api = FakeApi::returning(Vec::new());
        let h = mount(Some(api.clone()));

        for partial in ["gh", "gho", "ghos", "ghost"] {
            h.dom.type_into(h.hooks.input, partial);
            h.scheduler.advance(120);
        }
        assert!(api.calls().is_empty());
        assert_eq!(h.scheduler.pending_timers(), 1);

        h.scheduler.advance(300);
        assert_eq!(api.calls(), vec!["ghost"]);
        assert_eq!(h.scheduler.pending_timers(), 0);
    }

    #[test]
    fn the_query_is_trimmed_before_sending() {
        let api = FakeApi::returning(Vec::new());
        let h = mount(Some(api.clone()));

        h.dom.type_into(h.hooks.input, "  ghost  ");
        h.scheduler.advance(300);
        assert_eq!(api.calls(), vec!["ghost"]);
    }

    #[test]
    fn empty_result_set_renders_the_no_results_line() {
        let api = FakeApi::returning(Vec::new());
        let h = mount(Some(api));

        h.dom.type_into(h.hooks.input, "ghost");
        h.scheduler.advance(300);

        let children = result_children(&h);
        assert_eq!(children.len(), 1);
        assert_eq!(h.dom.tag(children[0]), "p");
        assert!(h.dom.has_class(&children[0], "search-no-results"));
        assert_eq!(results_text(&h), r#"No results found for "ghost""#);
    }

    #[test]
    fn failures_render_the_unavailable_message() {
        for err in [
            SearchError::Status(500),
            SearchError::Network("offline".to_string()),
            SearchError::Decode("expected `posts`".to_string()),
        ] {
            let h = mount(Some(FakeApi::failing(err)));

            h.dom.type_into(h.hooks.input, "ghost");
            h.scheduler.advance(300);

            let children = result_children(&h);
            assert_eq!(children.len(), 1);
            assert!(h.dom.has_class(&children[0], "search-error"));
            assert_eq!(
                results_text(&h),
                "Search is currently unavailable. Please try again later."
            );
        }
    }

    #[test]
    fn posts_render_as_result_cards() {
        let long_excerpt = "word ".repeat(40);
        let api = FakeApi::returning(vec![
            post("Reading Romans Slowly", Some(&long_excerpt), Some("/content/images/romans.jpg")),
            post("Sola Scriptura", None, None),
        ]);
        let h = mount(Some(api));

        h.dom.type_into(h.hooks.input, "ro");
        h.scheduler.advance(300);

        let cards = result_children(&h);
        assert_eq!(cards.len(), 2);

        let first = cards[0];
        assert_eq!(h.dom.tag(first), "a");
        assert!(h.dom.has_class(&first, "search-result"));
        assert_eq!(
            h.dom.attribute(&first, "href").as_deref(),
            Some("https://commentary.example/reading-romans-slowly/")
        );
        let img = h.dom.query_in(&first, "img").expect("feature image");
        assert_eq!(h.dom.attribute(&img, "src").as_deref(), Some("/content/images/romans.jpg"));
        assert_eq!(h.dom.attribute(&img, "alt").as_deref(), Some(""));
        assert_eq!(h.dom.attribute(&img, "loading").as_deref(), Some("lazy"));
        let title = h.dom.query_in(&first, ".search-result-content h4").expect("title");
        assert_eq!(h.dom.text(&title), "Reading Romans Slowly");
        let excerpt = h.dom.query_in(&first, ".search-result-content p").expect("excerpt");
        let excerpt_text = h.dom.text(&excerpt);
        assert_eq!(excerpt_text, format!("{}...", &long_excerpt[..120]));

        let second = cards[1];
        assert!(h.dom.query_in(&second, "img").is_none());
        assert!(h.dom.query_in(&second, ".search-result-no-image").is_some());
        assert!(h.dom.query_in(&second, ".search-result-content p").is_none());
    }

    #[test]
    fn open_then_close_restores_a_clean_overlay() {
        let api = FakeApi::returning(vec![post("Grace", None, None)]);
        let h = mount(Some(api));
        let body = h.dom.body_node();

        h.dom.click(h.hooks.toggle);
        assert!(h.search.is_open());
        assert_eq!(h.dom.focused(), Some(h.hooks.input));
        assert_eq!(h.dom.style(body, "overflow").as_deref(), Some("hidden"));

        h.dom.type_into(h.hooks.input, "grace");
        h.scheduler.advance(300);
        assert!(!result_children(&h).is_empty());

        h.dom.click(h.hooks.close);
        assert!(!h.search.is_open());
        assert_eq!(h.dom.value(&h.hooks.input), "");
        assert!(result_children(&h).is_empty());
        assert_eq!(h.dom.style(body, "overflow"), None);
    }

    #[test]
    fn closing_drops_a_query_still_waiting_on_its_timer() {
        let api = FakeApi::returning(Vec::new());
        let h = mount(Some(api.clone()));

        h.dom.click(h.hooks.toggle);
        h.dom.type_into(h.hooks.input, "ghost");
        h.dom.key_down(None, "Escape", Modifiers::default());
        h.scheduler.advance(1_000);

        assert!(api.calls().is_empty());
        assert!(result_children(&h).is_empty());
    }

    #[test]
    fn keyboard_shortcut_and_escape() {
        let h = mount(Some(FakeApi::returning(Vec::new())));

        let ctrl_k = h.dom.key_down(None, "k", Modifiers { ctrl: true, meta: false });
        assert!(h.search.is_open());
        assert!(ctrl_k.default_prevented());

        h.dom.key_down(None, "Escape", Modifiers::default());
        assert!(!h.search.is_open());

        let cmd_k = h.dom.key_down(Some(h.hooks.input), "k", Modifiers { ctrl: false, meta: true });
        assert!(h.search.is_open());
        assert!(cmd_k.default_prevented());

        let plain_k = h.dom.key_down(None, "k", Modifiers::default());
        assert!(!plain_k.default_prevented());
    }

    #[test]
    fn backdrop_click_closes_but_panel_click_does_not() {
        let h = mount(Some(FakeApi::returning(Vec::new())));

        h.dom.click(h.hooks.toggle);
        h.dom.click(h.hooks.panel);
        assert!(h.search.is_open());

        h.dom.click(h.hooks.overlay);
        assert!(!h.search.is_open());
    }

    #[test]
    fn unconfigured_search_shows_setup_steps_and_ignores_typing() {
        let h = mount(None);
        assert!(!h.search.is_configured());

        h.dom.click(h.hooks.toggle);
        let message = h
            .dom
            .query_in(&h.hooks.results, ".search-setup-message")
            .expect("setup message");
        let text = h.dom.text(&message);
        assert!(text.starts_with("Search needs to be configured.To enable search:"));
        assert_eq!(h.dom.query_all_in(&message, "ol li").len(), 5);

        h.dom.type_into(h.hooks.input, "ghost");
        h.scheduler.advance(1_000);
        assert_eq!(h.scheduler.pending_timers(), 0);
        assert!(h.dom.query_in(&h.hooks.results, ".search-setup-message").is_some());
    }

    #[test]
    fn unconfigured_shortcut_also_shows_setup_steps() {
        let h = mount(None);
        h.dom.key_down(None, "k", Modifiers { ctrl: true, meta: false });
        assert!(h.dom.query_in(&h.hooks.results, ".search-setup-message").is_some());
    }

    // In-flight requests are not cancelled: whichever response arrives last
    // is what stays on screen, even if it answers an older query.
    #[test]
    fn late_responses_to_older_queries_still_render() {
        let api = FakeApi::deferred();
        let h = mount(Some(api.clone()));

        h.dom.type_into(h.hooks.input, "grace");
        h.scheduler.advance(300);
        h.dom.type_into(h.hooks.input, "gospel");
        h.scheduler.advance(300);
        assert_eq!(api.calls(), vec!["grace", "gospel"]);

        api.resolve(1, vec![post("Gospel of Mark", None, None)]);
        h.scheduler.run_until_stalled();
        assert!(results_text(&h).contains("Gospel of Mark"));

        api.resolve(0, vec![post("Amazing Grace", None, None)]);
        h.scheduler.run_until_stalled();
        assert!(results_text(&h).contains("Amazing Grace"));
        assert!(!results_text(&h).contains("Gospel of Mark"));
    }
}
