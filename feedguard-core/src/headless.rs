// feedguard-core/src/headless.rs
//! `headless.rs`
//! Free-function entry points backed by a process-wide default `Sanitizer`.
//!
//! The default sanitizer is built once, on first use, from the built-in
//! policies and reports faults to the log. Callers that need a custom
//! reporter or policy set should hold their own `Sanitizer` instead.

use log::error;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::record::{SanitizedFeed, SanitizedRssItem, SanitizedRssMeta};
use crate::sanitizer::{sanitize_link, Sanitizer};
use crate::untrusted::Untrusted;

static DEFAULT_SANITIZER: Lazy<Option<Sanitizer>> = Lazy::new(|| match Sanitizer::new() {
    Ok(sanitizer) => Some(sanitizer),
    Err(e) => {
        error!(
            target: "feedguard_core::fault",
            "Default sanitizer unavailable, all markup will sanitize to empty: {:#}", e
        );
        None
    }
});

/// The shared default sanitizer, if the built-in policies compiled.
pub fn default_sanitizer() -> Option<&'static Sanitizer> {
    DEFAULT_SANITIZER.as_ref()
}

/// Restricts untrusted HTML to the built-in HTML policy.
pub fn sanitize_html<'a>(input: impl Into<Untrusted<'a>>) -> String {
    default_sanitizer().map(|s| s.html(input)).unwrap_or_default()
}

/// Strips all markup from untrusted text.
pub fn sanitize_text<'a>(input: impl Into<Untrusted<'a>>) -> String {
    default_sanitizer().map(|s| s.text(input)).unwrap_or_default()
}

/// Returns the trimmed input when it is an absolute `http`/`https` URL.
pub fn sanitize_url<'a>(input: impl Into<Untrusted<'a>>) -> Option<String> {
    sanitize_link(input)
}

/// Sanitizes a raw feed entry; `None` is the empty record.
pub fn sanitize_rss_item(raw: &Value) -> Option<SanitizedRssItem> {
    default_sanitizer()?.rss_item(raw)
}

/// Sanitizes raw feed metadata; `None` is the empty record.
pub fn sanitize_rss_meta(raw: &Value) -> Option<SanitizedRssMeta> {
    default_sanitizer()?.rss_meta(raw)
}

/// Sanitizes a parsed feed (metadata plus `items`).
pub fn sanitize_feed(raw: &Value) -> SanitizedFeed {
    default_sanitizer().map(|s| s.feed(raw)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_sanitizer_is_available() {
        assert!(default_sanitizer().is_some());
    }

    #[test]
    fn test_headless_round_trip_through_defaults() {
        assert_eq!(sanitize_text("<i>T</i>"), "T");
        assert_eq!(sanitize_html("<u>x</u>"), "<u>x</u>");
        assert_eq!(sanitize_url(" https://e.com "), Some("https://e.com".to_string()));
        assert_eq!(sanitize_rss_item(&json!(null)), None);
        assert_eq!(sanitize_rss_meta(&json!("string")), None);
    }
}
