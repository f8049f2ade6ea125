// feedguard/src/ui/fault_summary.rs
//! Summary of a sanitize run: how many records were produced and which
//! internal faults the sanitizer reported while producing them.

use feedguard_core::FaultRecord;
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub fn print_summary<W: Write>(
    records: usize,
    faults: &[FaultRecord],
    writer: &mut W,
    supports_color: bool,
) -> io::Result<()> {
    let headline = format!(
        "Sanitized {} record{}; {} fault{} reported.",
        records,
        if records == 1 { "" } else { "s" },
        faults.len(),
        if faults.len() == 1 { "" } else { "s" }
    );
    if supports_color {
        if faults.is_empty() {
            writeln!(writer, "{}", headline.green())?;
        } else {
            writeln!(writer, "{}", headline.yellow())?;
        }
    } else {
        writeln!(writer, "{}", headline)?;
    }

    let mut by_label: BTreeMap<&str, usize> = BTreeMap::new();
    for fault in faults {
        *by_label.entry(fault.label.as_str()).or_default() += 1;
    }
    for (label, count) in by_label {
        writeln!(writer, "  {} x{}", label, count)?;
    }
    Ok(())
}
