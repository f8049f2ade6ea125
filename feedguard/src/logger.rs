// feedguard/src/logger.rs
//! Logger setup for the `feedguard` binary.
//!
//! Logs go to stderr so they never mix with sanitized output on stdout.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honoured (default `warn`) unless `level_override` is given,
/// in which case it wins for every target.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_module_path(false);
    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}
