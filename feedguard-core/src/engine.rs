// feedguard-core/src/engine.rs
//! Defines the core MarkupEngine trait.
//!
//! The `MarkupEngine` trait is the capability interface the sanitizers rely
//! on: "restrict this untrusted markup to my policy". It decouples the
//! record-level logic from the concrete HTML library, so an alternative
//! engine (or a failing one, in tests) can be swapped in.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::FeedGuardError;

/// A markup restriction engine bound to a single policy.
pub trait MarkupEngine: Send + Sync {
    /// Restricts `input` to the engine's policy and returns the serialized
    /// result.
    ///
    /// Implementations must not panic; unexpected internal failures are
    /// returned as errors so the caller can report them and fall back to an
    /// empty value.
    fn clean(&self, input: &str) -> Result<String, FeedGuardError>;

    /// Name of the policy this engine enforces.
    fn policy_name(&self) -> &str;

    /// Fingerprint of the policy this engine enforces.
    fn fingerprint(&self) -> &str;
}
