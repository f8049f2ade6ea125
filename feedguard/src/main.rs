// feedguard/src/main.rs
//! feedguard entry point.
//!
//! Resolves the effective policies, builds one sanitizer wired to a
//! collecting fault reporter and dispatches the chosen subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use feedguard::cli::{Cli, Commands};
use feedguard::commands::sanitize::{run_sanitize_opts, SanitizeOptions};
use feedguard::commands::single::{run_single, SingleValueKind};
use feedguard::commands::{error_msg, policy, read_stdin, resolve_policies};
use feedguard::logger;
use feedguard_core::{CollectingReporter, Sanitizer};
use log::LevelFilter;
use std::fs;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            error_msg(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let config = resolve_policies(cli.policy.as_deref(), !cli.no_user_policy)?;

    if let Commands::Policy = cli.command {
        policy::print_policies(&config, &mut io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let reporter = Arc::new(CollectingReporter::new());
    let sanitizer = Sanitizer::with_config(&config)
        .context("Failed to build sanitizer from policies")?
        .with_reporter(reporter.clone());

    match cli.command {
        Commands::Sanitize(cmd) => {
            let input = match &cmd.input_file {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file: {}", path.display()))?,
                None => read_stdin()?,
            };
            run_sanitize_opts(
                &sanitizer,
                &reporter,
                SanitizeOptions {
                    input,
                    kind: cmd.kind,
                    output_path: cmd.output,
                    compact: cmd.compact,
                    no_summary: cmd.no_summary,
                    quiet: cli.quiet,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Html(args) => run_single(&sanitizer, SingleValueKind::Html, args.value),
        Commands::Text(args) => run_single(&sanitizer, SingleValueKind::Text, args.value),
        Commands::Url(args) => run_single(&sanitizer, SingleValueKind::Url, args.value),
        Commands::Policy => Ok(ExitCode::SUCCESS),
    }
}
