// feedguard-core/src/reporter.rs
//! Fault reporting for unexpected sanitization failures.
//!
//! The sanitizers never return errors. When something unexpected happens they
//! hand a fixed label and the error to a `FaultReporter` and fall back to an
//! empty value. Reporters must tolerate concurrent calls.

use chrono::Utc;
use log::error;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

use crate::errors::FeedGuardError;

/// Sink for unexpected sanitization failures.
pub trait FaultReporter: Send + Sync {
    fn report(&self, label: &str, error: &FeedGuardError);
}

impl<F> FaultReporter for F
where
    F: Fn(&str, &FeedGuardError) + Send + Sync,
{
    fn report(&self, label: &str, error: &FeedGuardError) {
        self(label, error)
    }
}

/// Default reporter: writes faults to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FaultReporter for LogReporter {
    fn report(&self, label: &str, error: &FeedGuardError) {
        error!(target: "feedguard_core::fault", "{}: {}", label, error);
    }
}

/// A single reported fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub label: String,
    pub message: String,
    pub timestamp: String,
}

/// Reporter that logs each fault and keeps a copy for later inspection.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    faults: Mutex<Vec<FaultRecord>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the faults reported so far.
    pub fn faults(&self) -> Vec<FaultRecord> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FaultReporter for CollectingReporter {
    fn report(&self, label: &str, error: &FeedGuardError) {
        LogReporter.report(label, error);
        let record = FaultRecord {
            label: label.to_string(),
            message: error.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_collecting_reporter_records_label_and_message() {
        let reporter = CollectingReporter::new();
        assert!(reporter.is_empty());
        reporter.report("HTML sanitization error", &FeedGuardError::RecordPanic("boom".to_string()));
        let faults = reporter.faults();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].label, "HTML sanitization error");
        assert!(!faults[0].timestamp.is_empty());
    }

    #[test]
    fn test_closures_are_reporters() {
        let calls = AtomicUsize::new(0);
        let reporter = |_: &str, _: &FeedGuardError| {
            calls.fetch_add(1, Ordering::SeqCst);
        };
        reporter.report("x", &FeedGuardError::RecordPanic("boom".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
