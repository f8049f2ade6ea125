//! compiler.rs - Manages the compilation and caching of markup policies.
//!
//! This module converts a `MarkupPolicy` into a `CompiledPolicy`: a fully
//! configured `ammonia::Builder` plus the compiled URI pattern. Compiled
//! policies are shared through a global cache keyed by the policy
//! fingerprint, so each distinct policy is compiled once per process.
//!
//! License: MIT OR APACHE 2.0

use ammonia::{Builder, UrlRelative};
use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::{validate_policy, MarkupPolicy, MAX_PATTERN_LENGTH};
use crate::errors::FeedGuardError;
use crate::sanitizers::template::scrub_attribute_value;

/// Attributes whose values are URIs and must pass the policy's URI pattern.
pub const URI_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// A markup policy ready to be applied.
#[derive(Debug)]
pub struct CompiledPolicy {
    /// Name of the source policy.
    pub name: String,
    /// Fingerprint of the source policy; also the cache key.
    pub fingerprint: String,
    /// Whether serialized text must be scrubbed of template expressions.
    pub template_safe: bool,
    /// The configured ammonia builder.
    pub builder: Builder<'static>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled policies, keyed by fingerprint.
    static ref COMPILED_POLICY_CACHE: RwLock<HashMap<String, Arc<CompiledPolicy>>> =
        RwLock::new(HashMap::new());

    /// Tag, attribute and scheme names handed to ammonia, which borrows them
    /// for the builder's lifetime. Compiled policies live for the whole
    /// process, so each distinct name is stored once and never freed.
    static ref INTERNED_NAMES: Mutex<HashSet<&'static str>> = Mutex::new(HashSet::new());
}

fn intern(name: &str) -> &'static str {
    let mut pool = INTERNED_NAMES.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = pool.get(name) {
        return *existing;
    }
    let stored: &'static str = Box::leak(name.to_owned().into_boxed_str());
    pool.insert(stored);
    stored
}

fn intern_all(names: &[String]) -> HashSet<&'static str> {
    names.iter().map(|n| intern(n)).collect()
}

/// Characters ignored when matching a URI value against the policy pattern.
fn is_attribute_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Returns true when `value` is acceptable for a URI-bearing attribute.
pub fn uri_matches(pattern: &Regex, value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !is_attribute_whitespace(*c)).collect();
    pattern.is_match(&compact)
}

fn compile_uri_pattern(policy: &MarkupPolicy) -> Result<Option<Regex>, FeedGuardError> {
    let Some(pattern) = policy.uri_pattern.as_deref() else {
        return Ok(None);
    };
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(FeedGuardError::PatternLengthExceeded(
            policy.name.clone(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(10 * (1 << 20))
        .build()
        .map(Some)
        .map_err(|e| FeedGuardError::PatternCompilationError(policy.name.clone(), e))
}

/// Compiles a policy into a `CompiledPolicy`.
/// This is the low-level function that builds the ammonia configuration.
pub fn compile_policy(policy: &MarkupPolicy) -> Result<CompiledPolicy, FeedGuardError> {
    let policy = policy.clone().normalized();
    debug!(
        "Compiling policy '{}': {} tags, {} attributes, {} discard-content tags.",
        policy.name,
        policy.allowed_tags.len(),
        policy.allowed_attributes.len(),
        policy.discard_content_tags.len()
    );

    let errors = validate_policy(&policy);
    if !errors.is_empty() {
        return Err(FeedGuardError::PolicyValidation(errors.join("\n")));
    }

    let uri_pattern = compile_uri_pattern(&policy)?;
    let template_safe = policy.template_safe;

    let mut builder = Builder::empty();
    builder
        .tags(intern_all(&policy.allowed_tags))
        .clean_content_tags(intern_all(&policy.discard_content_tags))
        .generic_attributes(intern_all(&policy.allowed_attributes))
        .tag_attributes(HashMap::new())
        .url_schemes(intern_all(&policy.url_schemes))
        .url_relative(UrlRelative::PassThrough)
        .link_rel(None)
        .strip_comments(true);

    if uri_pattern.is_some() || template_safe {
        builder.attribute_filter(move |_element, attribute, value| {
            if let Some(pattern) = &uri_pattern {
                if URI_ATTRIBUTES.contains(&attribute) && !uri_matches(pattern, value) {
                    return None;
                }
            }
            if template_safe {
                Some(scrub_attribute_value(value))
            } else {
                Some(Cow::Borrowed(value))
            }
        });
    }

    log::debug!(
        target: "feedguard_core::sanitizer",
        "Policy '{}' compiled successfully.",
        &policy.name
    );

    Ok(CompiledPolicy {
        fingerprint: policy.fingerprint(),
        name: policy.name,
        template_safe,
        builder,
    })
}

/// Gets a `CompiledPolicy` from the cache or compiles it if not found.
///
/// This is the public entry point for retrieving compiled policies. It returns
/// an `Arc` so engines can share one compilation.
pub fn get_or_compile_policy(policy: &MarkupPolicy) -> Result<Arc<CompiledPolicy>> {
    let cache_key = policy.clone().normalized().fingerprint();

    {
        let cache = COMPILED_POLICY_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(compiled) = cache.get(&cache_key) {
            debug!("Serving compiled policy '{}' from cache.", compiled.name);
            return Ok(Arc::clone(compiled));
        }
    }

    debug!("Compiled policy not found in cache. Compiling now.");
    let compiled = Arc::new(compile_policy(policy)?);

    let mut cache = COMPILED_POLICY_CACHE.write().unwrap_or_else(PoisonError::into_inner);
    let entry = cache.entry(cache_key).or_insert_with(|| Arc::clone(&compiled));
    debug!("Cached compiled policy '{}' ({}).", entry.name, entry.fingerprint);
    Ok(Arc::clone(entry))
}
