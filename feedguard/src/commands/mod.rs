//! Command implementations and the helpers they share.

pub mod policy;
pub mod sanitize;
pub mod single;

use anyhow::{Context, Result};
use feedguard_core::{merge_policies, PolicyConfig, PolicyOverrides};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::ui::output_format;

/// File name of the per-user policy overrides inside the config directory.
pub const USER_POLICY_FILE: &str = "policy.yaml";

/// `$CONFIG_DIR/feedguard/policy.yaml`, if a config directory exists.
pub fn user_policy_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("feedguard").join(USER_POLICY_FILE))
}

/// Builds the effective policies: built-in defaults, merged with an explicit
/// override file or, failing that, the per-user override file if present.
pub fn resolve_policies(explicit: Option<&Path>, use_user_policy: bool) -> Result<PolicyConfig> {
    let defaults = PolicyConfig::load_default_policies()?;

    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if use_user_policy => user_policy_path().filter(|p| p.is_file()),
        None => None,
    };

    match source {
        Some(path) => {
            info!("Applying policy overrides from {}", path.display());
            let overrides = PolicyOverrides::load_from_file(&path)?;
            merge_policies(defaults, Some(overrides))
                .with_context(|| format!("Invalid policy overrides in {}", path.display()))
        }
        None => {
            debug!("No policy overrides; using built-in policies.");
            Ok(defaults)
        }
    }
}

/// Reads all of stdin into a string.
pub fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}
