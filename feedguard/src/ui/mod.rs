//! Terminal output helpers for status messages and the fault summary.

pub mod fault_summary;
pub mod output_format;
