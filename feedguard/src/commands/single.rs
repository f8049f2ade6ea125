//! `feedguard html|text|url`: sanitize one value given inline or on stdin.

use anyhow::Result;
use feedguard_core::Sanitizer;
use log::debug;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::commands::read_stdin;

/// Which primitive to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleValueKind {
    Html,
    Text,
    Url,
}

/// Resolves the value from the argument or stdin. A trailing newline from
/// stdin is not part of the value.
pub fn resolve_value(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => {
            let mut buf = read_stdin()?;
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
    }
}

/// Applies one primitive. `None` means the value was rejected (links only).
pub fn sanitize_value(sanitizer: &Sanitizer, kind: SingleValueKind, value: &str) -> Option<String> {
    match kind {
        SingleValueKind::Html => Some(sanitizer.html(value)),
        SingleValueKind::Text => Some(sanitizer.text(value)),
        SingleValueKind::Url => sanitizer.url(value),
    }
}

pub fn run_single(sanitizer: &Sanitizer, kind: SingleValueKind, value: Option<String>) -> Result<ExitCode> {
    let value = resolve_value(value)?;
    debug!("Sanitizing single {:?} value ({} bytes).", kind, value.len());

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    match sanitize_value(sanitizer, kind, &value) {
        Some(out) => {
            writeln!(writer, "{}", out)?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
