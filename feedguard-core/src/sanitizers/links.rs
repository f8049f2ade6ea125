//! links.rs - Validation of standalone link fields.
//!
//! Link fields (`link`, `thumbnail`, `image`) are rendered as `href`/`src`
//! targets, so they are held to a stricter rule than URI attributes inside
//! restricted HTML: only absolute `http`/`https` URLs survive. Rejection is
//! the expected outcome for a large share of real feeds and is never treated
//! as a fault.
//!
//! License: MIT OR APACHE 2.0

use log::trace;
use url::Url;

/// Schemes accepted for link fields.
pub const LINK_SCHEMES: [&str; 2] = ["http", "https"];

/// Validates a link and returns the trimmed original text when it is an
/// absolute `http`/`https` URL.
///
/// The returned string is the caller's text minus surrounding whitespace
/// (including U+FEFF), not the parser's normalized serialization.
pub fn validate_link(raw: &str) -> Option<&str> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(parsed) if LINK_SCHEMES.contains(&parsed.scheme()) => Some(trimmed),
        Ok(parsed) => {
            trace!("Rejected link with scheme '{}'.", parsed.scheme());
            None
        }
        Err(e) => {
            trace!("Rejected unparseable link: {}", e);
            None
        }
    }
}
