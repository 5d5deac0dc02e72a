//! Configuration for the theme behaviour layer.

use wasm_bindgen::JsValue;

/// Console log level: `Debug` in debug builds, `Info` in release builds.
pub const LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Debug
} else {
    log::Level::Info
};

/// Quiet period after the last keystroke before a search request is sent.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Queries shorter than this (after trimming) clear the results instead.
pub const SEARCH_MIN_QUERY_CHARS: usize = 2;

/// `limit` sent to the content API.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Excerpts longer than this are cut and suffixed with `...`.
pub const SEARCH_EXCERPT_MAX_CHARS: usize = 120;

/// Scroll offset past which the header gets its `scrolled` state.
pub const STICKY_HEADER_OFFSET_PX: f64 = 20.0;

/// Viewport width above which the mobile menu is force-closed.
pub const NAV_BREAKPOINT_PX: f64 = 768.0;

/// Minimum horizontal travel for a touch gesture to count as a swipe.
pub const CAROUSEL_SWIPE_THRESHOLD_PX: f64 = 50.0;

// Build-time fallbacks, used when the page does not expose `ghost.url` /
// `ghost.key` (e.g. a static preview build).
const FALLBACK_API_URL: Option<&str> = option_env!("BEARDED_CONTENT_API_URL");
const FALLBACK_API_KEY: Option<&str> = option_env!("BEARDED_CONTENT_API_KEY");

/// Where the content API lives and how to authenticate against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Site origin hosting `/ghost/api/content/`.
    pub api_url: String,
    /// Content API key.
    pub content_key: String,
}

impl SearchConfig {
    /// Build from explicit values; trailing slashes on the URL are dropped.
    pub fn new(api_url: impl Into<String>, content_key: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim().trim_end_matches('/').to_string(),
            content_key: content_key.into().trim().to_string(),
        }
    }

    /// Both the endpoint and the key are present.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.content_key.is_empty()
    }

    /// Read the `ghost` global the theme's `default.hbs` injects, falling back
    /// to the build-time values for missing fields.
    pub fn from_global(global: &JsValue) -> Self {
        let ghost = js_sys::Reflect::get(global, &JsValue::from_str("ghost"))
            .ok()
            .filter(|value| value.is_object());
        let field = |name: &str| {
            ghost
                .as_ref()
                .and_then(|obj| js_sys::Reflect::get(obj, &JsValue::from_str(name)).ok())
                .and_then(|value| value.as_string())
                .filter(|value| !value.trim().is_empty())
        };

        Self::new(
            field("url").or(FALLBACK_API_URL.map(str::to_string)).unwrap_or_default(),
            field("key").or(FALLBACK_API_KEY.map(str::to_string)).unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_follows_the_build_profile() {
        if cfg!(debug_assertions) {
            assert_eq!(LOG_LEVEL, log::Level::Debug);
        } else {
            assert_eq!(LOG_LEVEL, log::Level::Info);
        }
        assert!(log::Level::Error <= LOG_LEVEL, "errors are never filtered out");
    }

    #[test]
    fn configured_requires_both_fields() {
        assert!(SearchConfig::new("https://blog.example", "abc").is_configured());
        assert!(!SearchConfig::new("https://blog.example", "").is_configured());
        assert!(!SearchConfig::new("", "abc").is_configured());
        assert!(!SearchConfig::default().is_configured());
    }

    #[test]
    fn trailing_slashes_and_whitespace_are_normalized() {
        let config = SearchConfig::new(" https://blog.example/ ", " abc ");
        assert_eq!(config.api_url, "https://blog.example");
        assert_eq!(config.content_key, "abc");
    }
}
