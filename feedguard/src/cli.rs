//! This file defines the command-line interface (CLI) for the feedguard
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "feedguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize untrusted RSS/Atom content before rendering",
    long_about = "feedguard reads feed records produced by an RSS/Atom parser as JSON and writes them back with every text field stripped of markup, every HTML field restricted to a safe allow-list, and every link field limited to absolute http/https URLs.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress informational output and the fault summary.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Policy override file (YAML) merged over the built-in policies.
    #[arg(
        long = "policy",
        value_name = "FILE",
        global = true,
        env = "FEEDGUARD_POLICY",
        help = "Merge policy overrides from a YAML file."
    )]
    pub policy: Option<PathBuf>,

    /// Ignore the per-user policy file in the configuration directory.
    #[arg(long = "no-user-policy", global = true, help = "Ignore the per-user policy file.")]
    pub no_user_policy: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `feedguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes a JSON document of raw feed records.
    #[command(about = "Sanitize a JSON feed, item, item list or metadata record.")]
    Sanitize(SanitizeCommand),

    /// Restricts a single HTML fragment to the HTML policy.
    #[command(about = "Sanitize one HTML fragment.")]
    Html(ValueArgs),

    /// Strips all markup from a single value.
    #[command(about = "Sanitize one plain-text value.")]
    Text(ValueArgs),

    /// Validates a single link; exits with status 1 when it is rejected.
    #[command(about = "Validate one link (absolute http/https only).")]
    Url(ValueArgs),

    /// Prints the effective policies.
    #[command(about = "Print the effective markup policies and their fingerprints.")]
    Policy,
}

/// The shape of the JSON document given to `sanitize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    /// Feed object: metadata fields plus an `items` array.
    Feed,
    /// A single item object.
    Item,
    /// An array of item objects.
    Items,
    /// A single metadata object.
    Meta,
}

/// Arguments for the `sanitize` command.
#[derive(Args, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Shape of the input document.
    #[arg(long, short = 'k', value_enum, default_value = "feed", help = "Shape of the input document.")]
    pub kind: RecordKind,

    /// Emit compact JSON instead of pretty-printed JSON.
    #[arg(long, help = "Emit compact JSON.")]
    pub compact: bool,

    /// Suppress the fault summary.
    #[arg(long = "no-summary", help = "Suppress the fault summary on stderr.")]
    pub no_summary: bool,
}

/// A single value, given inline or on stdin.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// The value to sanitize (reads from stdin if not provided).
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}
