//! buildenv: inspect and add build environment definitions across a tree of
//! pipeline config files.
//!
//! This is the main entry point for the `buildenv` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

mod buildenv;
mod cancel;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod graph;
mod options;
mod output;
mod persist;

#[cfg(test)]
mod test_support;

use cancel::{CancelToken, cancel_on_interrupt};
use cli::Cli;
use output::report_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let format = cli.format;
    let cancel = CancelToken::new();
    if let Err(err) = cancel_on_interrupt(&cancel) {
        tracing::warn!(error = %err, "continuing without Ctrl-C cancellation");
    }

    match commands::dispatch(cli, &cancel) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            report_error(format, &err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
