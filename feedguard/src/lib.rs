// feedguard/src/lib.rs
//! # Feedguard CLI Application
//!
//! This crate provides the command-line front end for `feedguard-core`: it
//! reads raw feed records as JSON, sanitizes them and writes sanitized JSON.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
