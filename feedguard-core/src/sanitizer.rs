// feedguard-core/src/sanitizer.rs
//! The `Sanitizer`: primitive and record-level sanitization of feed content.
//!
//! A `Sanitizer` owns two markup engines (restricted HTML and text-only) and
//! a fault reporter. Every operation is infallible by signature: unexpected
//! failures are reported under a fixed label and folded into the empty value
//! of the operation's return type (`""` for text and HTML, `None` for links
//! and records).
//!
//! Record-level panics are caught the same way as engine panics, and the same
//! caveat applies: the panic hook still runs before the fault is reported.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::debug;
use serde_json::{Map, Value};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::PolicyConfig;
use crate::engine::MarkupEngine;
use crate::engines::ammonia_engine::AmmoniaEngine;
use crate::errors::{panic_message, FeedGuardError};
use crate::record::{first_present, is_present, nested, SanitizedFeed, SanitizedRssItem, SanitizedRssMeta};
use crate::reporter::{FaultReporter, LogReporter};
use crate::sanitizers::links::validate_link;
use crate::untrusted::Untrusted;

pub const HTML_FAULT_LABEL: &str = "HTML sanitization error";
pub const TEXT_FAULT_LABEL: &str = "Text sanitization error";
pub const ITEM_FAULT_LABEL: &str = "RSS item sanitization error";
pub const META_FAULT_LABEL: &str = "RSS metadata sanitization error";

/// Sanitizes untrusted feed content against a fixed pair of policies.
#[derive(Clone)]
pub struct Sanitizer {
    html: Arc<dyn MarkupEngine>,
    text: Arc<dyn MarkupEngine>,
    reporter: Arc<dyn FaultReporter>,
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("html", &self.html.policy_name())
            .field("text", &self.text.policy_name())
            .finish_non_exhaustive()
    }
}

impl Sanitizer {
    /// Builds a sanitizer from the built-in policies, reporting faults to the log.
    pub fn new() -> Result<Self> {
        Self::with_config(&PolicyConfig::load_default_policies()?)
    }

    /// Builds a sanitizer from an explicit policy set.
    pub fn with_config(config: &PolicyConfig) -> Result<Self> {
        let html = AmmoniaEngine::new(&config.html)?;
        let text = AmmoniaEngine::new(&config.text)?;
        debug!(
            "Sanitizer ready: html={} text={}",
            html.fingerprint(),
            text.fingerprint()
        );
        Ok(Self::with_engines(Arc::new(html), Arc::new(text), Arc::new(LogReporter)))
    }

    /// Builds a sanitizer from arbitrary engines and reporter.
    pub fn with_engines(
        html: Arc<dyn MarkupEngine>,
        text: Arc<dyn MarkupEngine>,
        reporter: Arc<dyn FaultReporter>,
    ) -> Self {
        Self { html, text, reporter }
    }

    /// Replaces the fault reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn FaultReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    fn clean_or_report(&self, engine: &dyn MarkupEngine, label: &str, input: Untrusted<'_>) -> String {
        let Some(text) = input.as_str() else {
            return String::new();
        };
        match engine.clean(text) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                self.reporter.report(label, &e);
                String::new()
            }
        }
    }

    /// Restricts untrusted HTML to the HTML policy.
    pub fn html<'a>(&self, input: impl Into<Untrusted<'a>>) -> String {
        self.clean_or_report(self.html.as_ref(), HTML_FAULT_LABEL, input.into())
    }

    /// Strips all markup, keeping text content.
    pub fn text<'a>(&self, input: impl Into<Untrusted<'a>>) -> String {
        self.clean_or_report(self.text.as_ref(), TEXT_FAULT_LABEL, input.into())
    }

    /// Accepts only absolute `http`/`https` links; returns the trimmed input.
    pub fn url<'a>(&self, input: impl Into<Untrusted<'a>>) -> Option<String> {
        sanitize_link(input)
    }

    fn guard_record<T>(&self, label: &str, build: impl FnOnce() -> T) -> Option<T> {
        match panic::catch_unwind(AssertUnwindSafe(build)) {
            Ok(record) => Some(record),
            Err(payload) => {
                let error = FeedGuardError::RecordPanic(panic_message(payload.as_ref()));
                self.reporter.report(label, &error);
                None
            }
        }
    }

    fn build_item(&self, fields: &Map<String, Value>) -> SanitizedRssItem {
        let thumbnail = fields
            .get("thumbnail")
            .filter(|v| is_present(v))
            .or_else(|| nested(fields, "enclosure", "url"));
        SanitizedRssItem {
            title: self.text(fields.get("title")),
            description: self.html(first_present(fields, &["description", "content", "contentSnippet"])),
            link: self.url(fields.get("link")),
            author: self.text(fields.get("author")),
            pub_date: self.text(first_present(fields, &["pubDate", "isoDate"])),
            thumbnail: self.url(thumbnail),
        }
    }

    fn build_meta(&self, fields: &Map<String, Value>) -> SanitizedRssMeta {
        SanitizedRssMeta {
            title: self.text(fields.get("title")),
            description: self.text(fields.get("description")),
            link: self.url(fields.get("link")),
            author: self.text(fields.get("author")),
            image: self.url(fields.get("image")),
        }
    }

    /// Sanitizes a raw feed entry. Returns `None` (the empty record) when the
    /// input is not an object or the record could not be built.
    pub fn rss_item(&self, raw: &Value) -> Option<SanitizedRssItem> {
        let fields = raw.as_object()?;
        self.guard_record(ITEM_FAULT_LABEL, || self.build_item(fields))
    }

    /// Sanitizes raw feed metadata. Same empty-record policy as `rss_item`.
    pub fn rss_meta(&self, raw: &Value) -> Option<SanitizedRssMeta> {
        let fields = raw.as_object()?;
        self.guard_record(META_FAULT_LABEL, || self.build_meta(fields))
    }

    /// Sanitizes a whole parsed feed: top-level metadata plus every entry of
    /// its `items` array. Non-object entries become empty records.
    pub fn feed(&self, raw: &Value) -> SanitizedFeed {
        let items: Vec<Option<SanitizedRssItem>> = raw
            .get("items")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(|entry| self.rss_item(entry)).collect())
            .unwrap_or_default();
        debug!("Sanitized feed with {} items.", items.len());
        SanitizedFeed {
            meta: self.rss_meta(raw),
            items,
        }
    }
}

/// Standalone link validation; see `Sanitizer::url`.
pub fn sanitize_link<'a>(input: impl Into<Untrusted<'a>>) -> Option<String> {
    // Presence is checked on the raw text; whitespace-only input is rejected
    // by the validator after trimming.
    let raw = input.into().as_str()?;
    validate_link(raw).map(str::to_string)
}
