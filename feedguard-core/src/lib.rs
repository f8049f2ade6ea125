// feedguard-core/src/lib.rs
//! # Feedguard Core Library
//!
//! `feedguard-core` sanitizes untrusted content taken from RSS/Atom feeds so
//! it can be injected into a rendered page without enabling cross-site
//! scripting or malicious links. It works purely on in-memory strings and
//! `serde_json::Value` records: no fetching, no XML parsing, no rendering.
//!
//! ## Modules
//!
//! * `config`: `MarkupPolicy` / `PolicyConfig` definitions, YAML loading, merging and validation.
//! * `sanitizers`: policy compilation and caching, template-expression scrubbing, link validation.
//! * `engine`: the `MarkupEngine` trait, the capability the sanitizers depend on.
//! * `engines`: concrete engines (`AmmoniaEngine`).
//! * `sanitizer`: the `Sanitizer` type with the primitive and record operations.
//! * `headless`: free functions backed by a shared default `Sanitizer`.
//! * `record`: sanitized output records and raw-field lookup helpers.
//! * `reporter`: the `FaultReporter` trait and stock reporters.
//! * `untrusted`: the `Untrusted` input adaptor.
//! * `errors`: the `FeedGuardError` type.
//!
//! ## Public API
//!
//! **Primitives**
//!
//! * [`sanitize_html`]: restrict HTML to the structural/formatting allow-list; `""` on bad input.
//! * [`sanitize_text`]: strip all markup; `""` on bad input.
//! * [`sanitize_url`]: accept absolute `http`/`https` links only; `None` otherwise.
//!
//! **Records**
//!
//! * [`sanitize_rss_item`] / [`sanitize_rss_meta`]: field-by-field sanitization
//!   of raw records; `None` is the empty record.
//! * [`sanitize_feed`]: metadata plus every entry of a parsed feed.
//!
//! ## Usage Example
//!
//! ```rust
//! use feedguard_core::{sanitize_html, sanitize_rss_item, sanitize_url};
//! use serde_json::json;
//!
//! let html = sanitize_html("<script>alert(1)</script><p>hi</p>");
//! assert_eq!(html, "<p>hi</p>");
//!
//! assert_eq!(sanitize_url("javascript:alert(1)"), None);
//!
//! let item = sanitize_rss_item(&json!({
//!     "title": "<i>T</i>",
//!     "link": "javascript:evil()",
//!     "thumbnail": "http://x/i.png",
//! }))
//! .unwrap();
//! assert_eq!(item.title, "T");
//! assert_eq!(item.link, None);
//! assert_eq!(item.thumbnail.as_deref(), Some("http://x/i.png"));
//! ```
//!
//! ## Error Handling
//!
//! The sanitization operations never fail. Invalid input yields the empty
//! value silently; unexpected internal failures are passed to a
//! [`FaultReporter`] under a fixed label and then yield the empty value.
//! Setup APIs (policy loading, compilation) return `anyhow::Result`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod record;
pub mod reporter;
pub mod sanitizer;
pub mod sanitizers;
pub mod untrusted;

/// Re-exports the policy configuration types and functions.
pub use config::{
    merge_policies, validate_policy, MarkupPolicy, PolicyConfig, PolicyOverride, PolicyOverrides,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type.
pub use errors::FeedGuardError;

/// Re-exports the markup engine trait and its ammonia implementation.
pub use engine::MarkupEngine;
pub use engines::ammonia_engine::AmmoniaEngine;

/// Re-exports the sanitizer and its fault labels.
pub use sanitizer::{
    Sanitizer, HTML_FAULT_LABEL, ITEM_FAULT_LABEL, META_FAULT_LABEL, TEXT_FAULT_LABEL,
};

/// Re-exports the one-shot entry points.
pub use headless::{
    default_sanitizer, sanitize_feed, sanitize_html, sanitize_rss_item, sanitize_rss_meta,
    sanitize_text, sanitize_url,
};

/// Re-exports record types.
pub use record::{record_to_value, SanitizedFeed, SanitizedRssItem, SanitizedRssMeta};

/// Re-exports fault reporting types.
pub use reporter::{CollectingReporter, FaultRecord, FaultReporter, LogReporter};

pub use untrusted::Untrusted;

pub use sanitizers::compiler::{compile_policy, get_or_compile_policy, CompiledPolicy};
