//! template.rs - Removes client-side template expressions from sanitized output.
//!
//! Sanitized HTML is often injected into pages that are later processed by a
//! template engine (Vue, Angular, server-side ERB). An expression smuggled in
//! as plain text would be evaluated there, so template-safe policies replace
//! every `{{ … }}`, `<% … %>` and `${ … }` with a single space. Matching is
//! greedy to the end of the text run, so an unterminated opener also wipes
//! the remainder of that run.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref MUSTACHE_EXPR: Regex = Regex::new(r"(?s)\{\{.*|.*\}\}").unwrap();
    static ref ERB_EXPR: Regex = Regex::new(r"(?s)<%.*|.*%>").unwrap();
    /// ERB delimiters as they appear inside serialized (entity-escaped) text.
    static ref ESCAPED_ERB_EXPR: Regex = Regex::new(r"(?s)&lt;%.*|.*%&gt;").unwrap();
    static ref TEMPLATE_LITERAL_EXPR: Regex = Regex::new(r"(?s)\$\{.*").unwrap();
}

fn scrub_with<'a>(value: &'a str, patterns: [&Regex; 3]) -> Cow<'a, str> {
    let mut current = Cow::Borrowed(value);
    for pattern in patterns {
        let replaced = match pattern.replace_all(&current, " ") {
            Cow::Owned(replaced) => Some(replaced),
            Cow::Borrowed(_) => None,
        };
        if let Some(replaced) = replaced {
            current = Cow::Owned(replaced);
        }
    }
    current
}

/// Scrubs a decoded attribute value.
pub fn scrub_attribute_value(value: &str) -> Cow<'_, str> {
    scrub_with(value, [&MUSTACHE_EXPR, &ERB_EXPR, &TEMPLATE_LITERAL_EXPR])
}

/// Scrubs a run of serialized, entity-escaped text.
fn scrub_text_run(run: &str) -> Cow<'_, str> {
    scrub_with(run, [&MUSTACHE_EXPR, &ESCAPED_ERB_EXPR, &TEMPLATE_LITERAL_EXPR])
}

/// Returns the byte length of the tag starting at `s[0] == '<'`.
///
/// Serialized attribute values are always double-quoted with inner quotes
/// escaped, so a `>` inside quotes never ends the tag.
fn tag_len(s: &str) -> usize {
    let mut in_quotes = false;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b'>' if !in_quotes => return i + 1,
            _ => {}
        }
    }
    s.len()
}

/// Scrubs every text run of a serialized HTML fragment, leaving tags intact.
///
/// Each text node is scrubbed on its own, so an expression can never swallow
/// markup that follows it.
pub fn scrub_serialized_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while !rest.is_empty() {
        let end = if rest.starts_with('<') {
            let end = tag_len(rest);
            out.push_str(&rest[..end]);
            end
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            out.push_str(&scrub_text_run(&rest[..end]));
            end
        };
        rest = &rest[end..];
    }
    out
}
