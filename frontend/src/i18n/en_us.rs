//! English strings.

/// Search overlay.
pub mod search {
    /// Shown while the debounce timer is pending or a request is in flight.
    pub const SEARCHING: &str = "Searching...";
    /// Empty result set; `{}` is the query.
    pub const NO_RESULTS_TEMPLATE: &str = "No results found for \"{}\"";
    /// Any transport or decoding failure.
    pub const UNAVAILABLE: &str = "Search is currently unavailable. Please try again later.";
    /// Appended to cut excerpts.
    pub const ELLIPSIS: &str = "...";

    /// Bold heading of the setup message.
    pub const SETUP_TITLE: &str = "Search needs to be configured.";
    /// Line introducing the setup steps.
    pub const SETUP_INTRO: &str = "To enable search:";
    /// Ordered setup steps.
    pub const SETUP_STEPS: [&str; 5] = [
        "Go to Ghost Admin → Settings → Integrations",
        "Create a new Custom Integration",
        "Copy the Content API Key",
        "Go to Design → Site-wide → Content API key",
        "Paste the key and save",
    ];
}
