//! Command-line runtime for the `linedbg` terminal front-end.
//!
//! The runtime splits configuration flags from the target, loads layered
//! configuration, installs telemetry, and then runs an interactive loop that
//! relays operator commands to a [`linedbg::DebugSession`]. Configuration
//! loading and the IO streams are injectable so tests can exercise the whole
//! runtime in-process.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

mod cli;
mod command;
mod config;
mod errors;
mod host;
mod runtime;
mod telemetry;


use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;

/// Runs the CLI with the provided arguments, operator input, and output
/// streams.
///
/// Debugger activity is written to `stdout`; errors that end the run are
/// written to `stderr`.
#[must_use]
pub fn run<I, R, W, E>(args: I, input: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead + Send + 'static,
    W: Write,
    E: Write,
{
    run_with_loader(args, input, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    input: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead + Send + 'static,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&args);

    let cli = match Cli::try_parse_from(split.cli_arguments) {
        Ok(cli) => cli,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return report(stdout, &error, ExitCode::SUCCESS);
        }
        Err(error) => return report(stderr, &AppError::CliUsage(error), ExitCode::FAILURE),
    };

    let result = loader
        .load(&split.config_arguments)
        .and_then(|config| {
            telemetry::initialise(&config)?;
            Ok(config)
        })
        .and_then(|config| {
            runtime::run_interactive(&config, &cli.target, &cli.arguments, input, &mut *stdout)
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(stderr, &error, ExitCode::FAILURE),
    }
}

fn report<T: std::fmt::Display>(stream: &mut impl Write, message: &T, code: ExitCode) -> ExitCode {
    if writeln!(stream, "{message}").is_err() {
        return ExitCode::FAILURE;
    }
    code
}
