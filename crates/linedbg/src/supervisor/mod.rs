//! Ownership of the external debugger process.
//!
//! [`ProcessSupervisor`] spawns the debugger with its standard error merged
//! into standard output and places it in its own process group. A background
//! reader thread forwards output chunks over a channel and pings an optional
//! [`OutputNotifier`], so the host loop can pump output without ever blocking
//! on a read.
//!
//! Writes to the debugger's standard input are plain blocking writes with no
//! buffering of their own. Commands are short and interactive, so pipe
//! backpressure is not managed.

mod config;
mod error;
mod output;
mod process;
mod state;

pub use config::LaunchSpec;
pub use error::SupervisorError;
pub use output::{OutputChunk, OutputNotifier};
pub use process::ProcessSupervisor;

/// Log target for supervisor operations.
pub(crate) const SUPERVISOR_TARGET: &str = "linedbg::supervisor";
