//! Configuration management for `feedguard-core`.
//!
//! This module defines the markup policies that drive the HTML and text
//! sanitizers. Policies are plain data: they are deserialized from YAML
//! (the built-in set is embedded in the binary), validated, optionally merged
//! with user overrides, and compiled once by `sanitizers::compiler`.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a URI pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single allow-list markup policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkupPolicy {
    /// Identifier used in logs and fault messages (e.g., "html").
    pub name: String,
    /// Tags kept in the output. Everything else is unwrapped.
    pub allowed_tags: Vec<String>,
    /// Attributes kept on any allowed tag.
    pub allowed_attributes: Vec<String>,
    /// Case-insensitive pattern that URI-bearing attribute values must match.
    pub uri_pattern: Option<String>,
    /// Schemes accepted for absolute URLs in URI-bearing attributes.
    pub url_schemes: Vec<String>,
    /// Tags removed together with their entire subtree.
    pub discard_content_tags: Vec<String>,
    /// Replace template expressions (`{{ }}`, `<% %>`, `${ }`) with a space.
    pub template_safe: bool,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        Self {
            name: String::new(),
            allowed_tags: Vec::new(),
            allowed_attributes: Vec::new(),
            uri_pattern: None,
            url_schemes: Vec::new(),
            discard_content_tags: Vec::new(),
            template_safe: false,
        }
    }
}

impl MarkupPolicy {
    /// Stable SHA-256 fingerprint of the policy, hex encoded.
    ///
    /// List order does not affect the fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut canonical = self.clone();
        canonical.allowed_tags.sort();
        canonical.allowed_attributes.sort();
        canonical.url_schemes.sort();
        canonical.discard_content_tags.sort();

        let mut hasher = Sha256::new();
        hasher.update(canonical.name.as_bytes());
        for list in [
            &canonical.allowed_tags,
            &canonical.allowed_attributes,
            &canonical.url_schemes,
            &canonical.discard_content_tags,
        ] {
            hasher.update(b"\x1e");
            for entry in list {
                hasher.update(entry.as_bytes());
                hasher.update(b"\x1f");
            }
        }
        hasher.update(b"\x1e");
        hasher.update(canonical.uri_pattern.as_deref().unwrap_or("").as_bytes());
        hasher.update([canonical.template_safe as u8]);
        hex::encode(hasher.finalize())
    }

    /// Lowercases and de-duplicates every list, preserving first-seen order.
    pub fn normalized(mut self) -> Self {
        fn normalize(list: &mut Vec<String>) {
            let mut seen = HashSet::new();
            list.retain_mut(|entry| {
                *entry = entry.trim().to_ascii_lowercase();
                seen.insert(entry.clone())
            });
        }
        normalize(&mut self.allowed_tags);
        normalize(&mut self.allowed_attributes);
        normalize(&mut self.url_schemes);
        normalize(&mut self.discard_content_tags);
        self
    }
}

/// The two policies every sanitizer needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Policy for restricted-HTML fields.
    pub html: MarkupPolicy,
    /// Policy for plain-text fields.
    pub text: MarkupPolicy,
}

impl PolicyConfig {
    /// Loads the built-in policies from the embedded configuration.
    pub fn load_default_policies() -> Result<Self> {
        debug!("Loading default policies from embedded string...");
        let default_yaml = include_str!("../config/default_policy.yaml");
        let config: PolicyConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default policies")?;
        let config = config.normalized();
        config.validate()?;
        debug!(
            "Loaded default policies '{}' and '{}'.",
            config.html.name, config.text.name
        );
        Ok(config)
    }

    /// Loads a complete policy set from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading policies from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        let config: PolicyConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse policy file {}", path.display()))?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Serializes the policy set back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yml::to_string(self).context("Failed to serialize policies to YAML")
    }

    fn normalized(self) -> Self {
        Self {
            html: self.html.normalized(),
            text: self.text.normalized(),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut errors = validate_policy(&self.html);
        errors.extend(validate_policy(&self.text));
        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Policy validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Partial changes to a single policy, as written in a user policy file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyOverride {
    pub allowed_tags: Option<Vec<String>>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    pub allowed_attributes: Option<Vec<String>>,
    pub uri_pattern: Option<String>,
    pub url_schemes: Option<Vec<String>>,
    pub discard_content_tags: Option<Vec<String>>,
    pub template_safe: Option<bool>,
}

/// User-supplied overrides for the built-in policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PolicyOverrides {
    pub html: Option<PolicyOverride>,
    pub text: Option<PolicyOverride>,
}

impl PolicyOverrides {
    /// Loads overrides from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading policy overrides from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file {}", path.display()))?;
        serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse policy file {}", path.display()))
    }
}

fn apply_override(mut policy: MarkupPolicy, patch: PolicyOverride) -> MarkupPolicy {
    if let Some(tags) = patch.allowed_tags {
        debug!("Policy '{}': replacing allowed tags ({} entries).", policy.name, tags.len());
        policy.allowed_tags = tags;
    }
    if !patch.add_tags.is_empty() {
        debug!("Policy '{}': adding tags {:?}.", policy.name, patch.add_tags);
        policy.allowed_tags.extend(patch.add_tags);
    }
    if !patch.remove_tags.is_empty() {
        let remove: HashSet<String> = patch
            .remove_tags
            .iter()
            .map(|t| t.trim().to_ascii_lowercase())
            .collect();
        debug!("Policy '{}': removing tags {:?}.", policy.name, remove);
        policy
            .allowed_tags
            .retain(|t| !remove.contains(&t.trim().to_ascii_lowercase()));
    }
    if let Some(attrs) = patch.allowed_attributes {
        policy.allowed_attributes = attrs;
    }
    if let Some(pattern) = patch.uri_pattern {
        debug!("Policy '{}': overriding URI pattern.", policy.name);
        policy.uri_pattern = if pattern.is_empty() { None } else { Some(pattern) };
    }
    if let Some(schemes) = patch.url_schemes {
        policy.url_schemes = schemes;
    }
    if let Some(tags) = patch.discard_content_tags {
        policy.discard_content_tags = tags;
    }
    if let Some(template_safe) = patch.template_safe {
        policy.template_safe = template_safe;
    }
    policy.normalized()
}

/// Merges user overrides into the default policies and validates the result.
pub fn merge_policies(
    default_config: PolicyConfig,
    user_overrides: Option<PolicyOverrides>,
) -> Result<PolicyConfig> {
    let Some(overrides) = user_overrides else {
        debug!("merge_policies called without overrides; using defaults.");
        return Ok(default_config);
    };

    let PolicyConfig { mut html, mut text } = default_config;
    if let Some(patch) = overrides.html {
        html = apply_override(html, patch);
    }
    if let Some(patch) = overrides.text {
        text = apply_override(text, patch);
    }

    let merged = PolicyConfig { html, text };
    merged.validate()?;
    debug!(
        "Merged policies: html fingerprint {}, text fingerprint {}.",
        merged.html.fingerprint(),
        merged.text.fingerprint()
    );
    Ok(merged)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

/// Checks a policy for problems that would make it unusable or unsafe to
/// compile. Returns one message per problem; an empty list means valid.
pub fn validate_policy(policy: &MarkupPolicy) -> Vec<String> {
    let mut errors = Vec::new();

    if policy.name.is_empty() {
        errors.push("A policy has an empty `name` field.".to_string());
    }

    for tag in policy.allowed_tags.iter().chain(&policy.discard_content_tags) {
        if !is_valid_name(tag) {
            errors.push(format!("Policy '{}' lists an invalid tag name '{}'.", policy.name, tag));
        }
    }
    for attr in &policy.allowed_attributes {
        if !is_valid_name(attr) {
            errors.push(format!(
                "Policy '{}' lists an invalid attribute name '{}'.",
                policy.name, attr
            ));
        }
    }

    let discard: HashSet<&str> = policy.discard_content_tags.iter().map(String::as_str).collect();
    for tag in &policy.allowed_tags {
        if discard.contains(tag.as_str()) {
            errors.push(format!(
                "Policy '{}': tag '{}' is both allowed and content-discarded.",
                policy.name, tag
            ));
        }
    }

    for scheme in &policy.url_schemes {
        if scheme.is_empty() || !is_valid_name(scheme) || scheme.contains(':') {
            errors.push(format!(
                "Policy '{}' lists an invalid URL scheme '{}'.",
                policy.name, scheme
            ));
        }
    }

    if let Some(pattern) = &policy.uri_pattern {
        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Policy '{}': URI pattern length ({}) exceeds maximum allowed ({}).",
                policy.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
        } else if let Err(e) = RegexBuilder::new(pattern).case_insensitive(true).build() {
            errors.push(format!(
                "Policy '{}' has an invalid URI pattern: {}",
                policy.name, e
            ));
        }
    }

    let carries_uri_attrs = policy
        .allowed_attributes
        .iter()
        .any(|a| a == "href" || a == "src");
    if carries_uri_attrs && policy.url_schemes.is_empty() {
        warn!(
            "Policy '{}' allows URI attributes but no URL schemes; only relative URLs will survive.",
            policy.name
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies_load_and_validate() {
        let config = PolicyConfig::load_default_policies().unwrap();
        assert_eq!(config.html.name, "html");
        assert_eq!(config.text.name, "text");
        assert!(config.html.allowed_tags.iter().any(|t| t == "figcaption"));
        assert!(config.html.discard_content_tags.iter().any(|t| t == "script"));
        assert!(config.html.template_safe);
        assert!(config.text.allowed_tags.is_empty());
        assert!(validate_policy(&config.html).is_empty());
        assert!(validate_policy(&config.text).is_empty());
    }

    #[test]
    fn test_fingerprint_ignores_list_order() {
        let a = MarkupPolicy {
            name: "p".to_string(),
            allowed_tags: vec!["b".to_string(), "i".to_string()],
            ..Default::default()
        };
        let b = MarkupPolicy {
            allowed_tags: vec!["i".to_string(), "b".to_string()],
            ..a.clone()
        };
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = MarkupPolicy { template_safe: true, ..a.clone() };
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_normalized_lowercases_and_dedupes() {
        let policy = MarkupPolicy {
            name: "p".to_string(),
            allowed_tags: vec!["B".to_string(), " b ".to_string(), "I".to_string()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(policy.allowed_tags, vec!["b".to_string(), "i".to_string()]);
    }

    #[test]
    fn test_validate_reports_overlap_and_bad_pattern() {
        let policy = MarkupPolicy {
            name: "broken".to_string(),
            allowed_tags: vec!["script".to_string()],
            discard_content_tags: vec!["script".to_string()],
            uri_pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        let errors = validate_policy(&policy);
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[0].contains("both allowed and content-discarded"));
        assert!(errors[1].contains("invalid URI pattern"));
    }

    #[test]
    fn test_validate_rejects_long_pattern() {
        let policy = MarkupPolicy {
            name: "long".to_string(),
            uri_pattern: Some("a".repeat(MAX_PATTERN_LENGTH + 1)),
            ..Default::default()
        };
        let errors = validate_policy(&policy);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("exceeds maximum allowed"));
    }

    #[test]
    fn test_merge_applies_add_and_remove_tags() {
        let defaults = PolicyConfig::load_default_policies().unwrap();
        let overrides = PolicyOverrides {
            html: Some(PolicyOverride {
                add_tags: vec!["Sup".to_string()],
                remove_tags: vec!["img".to_string()],
                ..Default::default()
            }),
            text: None,
        };
        let merged = merge_policies(defaults.clone(), Some(overrides)).unwrap();
        assert!(merged.html.allowed_tags.iter().any(|t| t == "sup"));
        assert!(!merged.html.allowed_tags.iter().any(|t| t == "img"));
        assert_eq!(merged.text, defaults.text);
    }

    #[test]
    fn test_merge_rejects_invalid_result() {
        let defaults = PolicyConfig::load_default_policies().unwrap();
        let overrides = PolicyOverrides {
            html: Some(PolicyOverride {
                add_tags: vec!["script".to_string()],
                ..Default::default()
            }),
            text: None,
        };
        let err = merge_policies(defaults, Some(overrides)).unwrap_err();
        assert!(err.to_string().contains("Policy validation failed"));
    }
}
