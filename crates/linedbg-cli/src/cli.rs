//! CLI argument definitions for `linedbg`.

use clap::Parser;

/// Command-line interface for the terminal debugger front-end.
#[derive(Parser, Debug)]
#[command(
    name = "linedbg",
    about = "Drive a line debugger from the terminal",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Program to debug.
    #[arg(value_name = "TARGET")]
    pub(crate) target: String,
    /// Arguments passed to the program being debugged.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) arguments: Vec<String>,
}
