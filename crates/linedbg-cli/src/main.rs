//! Terminal front-end for driving a line debugger.
//!
//! The binary delegates to [`linedbg_cli::run`], which loads configuration,
//! starts the debugger on the requested target, and relays commands typed on
//! standard input until the operator exits.

use std::io::{self, BufReader, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'static> = io::stdout().lock();
    let mut stderr: StderrLock<'static> = io::stderr().lock();
    linedbg_cli::run(
        std::env::args_os(),
        BufReader::new(io::stdin()),
        &mut stdout,
        &mut stderr,
    )
}
