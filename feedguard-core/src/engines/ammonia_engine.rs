// feedguard-core/src/engines/ammonia_engine.rs
//! A `MarkupEngine` implementation backed by `ammonia`.
//!
//! The input is parsed as an HTML fragment with html5ever, filtered against
//! the compiled policy and re-serialized. Panics raised inside the parser or
//! serializer are caught here and surfaced as `FeedGuardError::EnginePanic`.
//!
//! `catch_unwind` does not silence the process panic hook, so a caught panic
//! still prints the hook's "thread panicked at" line to stderr next to the
//! reported fault. Embedders that want only the fault can install their own
//! hook with `std::panic::set_hook`.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::MarkupPolicy;
use crate::engine::MarkupEngine;
use crate::errors::{panic_message, FeedGuardError};
use crate::sanitizers::compiler::{get_or_compile_policy, CompiledPolicy};
use crate::sanitizers::template::scrub_serialized_html;

#[derive(Debug, Clone)]
pub struct AmmoniaEngine {
    compiled: Arc<CompiledPolicy>,
}

impl AmmoniaEngine {
    pub fn new(policy: &MarkupPolicy) -> Result<Self> {
        let compiled = get_or_compile_policy(policy).with_context(|| {
            format!("Failed to compile markup policy '{}' for AmmoniaEngine", policy.name)
        })?;
        Ok(Self { compiled })
    }
}

impl MarkupEngine for AmmoniaEngine {
    fn clean(&self, input: &str) -> Result<String, FeedGuardError> {
        let compiled = &self.compiled;
        let cleaned = panic::catch_unwind(AssertUnwindSafe(|| {
            compiled.builder.clean(input).to_string()
        }))
        .map_err(|payload| FeedGuardError::EnginePanic {
            policy: compiled.name.clone(),
            message: panic_message(payload.as_ref()),
        })?;

        let output = if compiled.template_safe {
            scrub_serialized_html(&cleaned)
        } else {
            cleaned
        };
        debug!(
            "Policy '{}' cleaned {} bytes into {} bytes.",
            compiled.name,
            input.len(),
            output.len()
        );
        Ok(output)
    }

    fn policy_name(&self) -> &str {
        &self.compiled.name
    }

    fn fingerprint(&self) -> &str {
        &self.compiled.fingerprint
    }
}
