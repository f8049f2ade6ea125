// feedguard-core/src/engines/mod.rs
//! This module contains the `MarkupEngine` implementations.
//!
//! Each engine lives in its own file and implements the `MarkupEngine`
//! trait. The shipped engine is backed by `ammonia` (html5ever).

pub mod ammonia_engine;
