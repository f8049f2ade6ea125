//! errors.rs - Custom error types for the feedguard-core library.
//!
//! This module defines a structured error enum for the library. The five
//! sanitization operations never return these to their callers; they are
//! handed to the fault reporter and folded into the operation's empty value.
//! Setup paths (policy loading, compilation) surface them directly.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `feedguard-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FeedGuardError {
    #[error("Failed to compile URI pattern for policy '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Policy '{0}': URI pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Policy validation failed:\n{0}")]
    PolicyValidation(String),

    #[error("Markup engine for policy '{policy}' panicked: {message}")]
    EnginePanic { policy: String, message: String },

    #[error("Record sanitization panicked: {0}")]
    RecordPanic(String),
}

/// Extracts a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
