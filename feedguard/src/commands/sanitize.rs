//! `feedguard sanitize`: sanitizes a JSON document of raw feed records.

use anyhow::{bail, Context, Result};
use feedguard_core::{record_to_value, CollectingReporter, Sanitizer};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::RecordKind;
use crate::commands::{info_msg, warn_msg};
use crate::ui::fault_summary;

/// Options for the `run_sanitize_opts` API.
pub struct SanitizeOptions {
    pub input: String,
    pub kind: RecordKind,
    pub output_path: Option<PathBuf>,
    pub compact: bool,
    pub no_summary: bool,
    pub quiet: bool,
}

/// Sanitizes a parsed document of the given kind.
///
/// Returns the sanitized JSON and the number of records it contains.
pub fn sanitize_document(sanitizer: &Sanitizer, kind: RecordKind, raw: &Value) -> Result<(Value, usize)> {
    let sanitized = match kind {
        RecordKind::Feed => {
            let feed = sanitizer.feed(raw);
            let count = feed.items.len() + 1;
            (serde_json::to_value(&feed).context("Failed to serialize sanitized feed")?, count)
        }
        RecordKind::Item => (record_to_value(sanitizer.rss_item(raw).as_ref()), 1),
        RecordKind::Meta => (record_to_value(sanitizer.rss_meta(raw).as_ref()), 1),
        RecordKind::Items => {
            let Some(entries) = raw.as_array() else {
                bail!("`--kind items` expects a JSON array of item objects");
            };
            let items: Vec<Value> = entries
                .iter()
                .map(|entry| record_to_value(sanitizer.rss_item(entry).as_ref()))
                .collect();
            let count = items.len();
            (Value::Array(items), count)
        }
    };
    Ok(sanitized)
}

/// The main operation runner for `feedguard sanitize`.
pub fn run_sanitize_opts(
    sanitizer: &Sanitizer,
    reporter: &CollectingReporter,
    opts: SanitizeOptions,
) -> Result<()> {
    info!("Starting sanitize operation ({:?}).", opts.kind);

    let raw: Value = serde_json::from_str(&opts.input).context("Input is not valid JSON")?;
    if opts.kind == RecordKind::Feed && !opts.quiet && !raw.get("items").is_some_and(Value::is_array) {
        warn_msg("Feed has no `items` array; only its metadata was sanitized.");
    }
    let (sanitized, records) = sanitize_document(sanitizer, opts.kind, &raw)?;
    debug!("Sanitized {} record(s).", records);

    let rendered = if opts.compact {
        serde_json::to_string(&sanitized)
    } else {
        serde_json::to_string_pretty(&sanitized)
    }
    .context("Failed to render sanitized JSON")?;

    write_output(&opts, &rendered)?;

    if !opts.no_summary && !opts.quiet {
        let supports_color = io::stderr().is_terminal();
        fault_summary::print_summary(records, &reporter.faults(), &mut io::stderr(), supports_color)?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

fn write_output(opts: &SanitizeOptions, rendered: &str) -> Result<()> {
    match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing sanitized content to file: {}", path.display()));
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", rendered)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", rendered)?;
        }
    }
    Ok(())
}
