//! Internal state of the supervised process.

use std::process::{Child, ChildStdin};
use std::sync::mpsc::Receiver;

use super::output::OutputChunk;

/// Lifecycle of the supervised debugger.
pub(super) enum ProcessState {
    /// No process has been started, or the last one was terminated.
    Idle,
    /// A process is running and wired to the reader thread.
    Running(RunningProcess),
}

/// Handles owned while the debugger runs.
pub(super) struct RunningProcess {
    /// The child process handle.
    pub(super) child: Child,
    /// Write end of the debugger's standard input.
    pub(super) stdin: ChildStdin,
    /// Output forwarded by the reader thread.
    pub(super) output: Receiver<OutputChunk>,
}
