//! User-visible strings.

pub mod en_us;

pub use en_us as current;

/// Substitute the first `{}` in `template` with `value`.
pub fn fill_one(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_one_replaces_only_the_first_placeholder() {
        assert_eq!(fill_one("a {} b {}", 1), "a 1 b {}");
        assert_eq!(fill_one("no placeholder", 1), "no placeholder");
    }
}
