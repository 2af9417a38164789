//! The debugger's line-oriented output protocol.
//!
//! [`LineReader`] turns raw output chunks into decoded lines and classifies
//! each one into a [`ProtocolEvent`]. Classification never fails: output the
//! reader does not recognise is passed through as [`ProtocolEvent::RawOutput`].

mod classify;
mod reader;


pub use classify::{CLEAR_ALL_PROMPT, PROMPT, classify};
pub use reader::LineReader;

/// Log target for protocol parsing.
pub(crate) const PROTOCOL_TARGET: &str = "linedbg::protocol";

/// One classified line of debugger output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// The debugger stopped at `file:line`.
    LineEvent {
        /// File containing the current frame.
        file: String,
        /// 1-based line about to execute.
        line: u32,
    },
    /// The debugger confirmed a new breakpoint.
    BreakpointAdded {
        /// Identifier assigned by the debugger.
        index: u32,
        /// File the breakpoint is set in.
        file: String,
        /// 1-based line of the breakpoint.
        line: u32,
    },
    /// The debugger confirmed a breakpoint was cleared.
    BreakpointDeleted {
        /// Identifier of the cleared breakpoint.
        index: u32,
    },
    /// Any other output, forwarded verbatim.
    RawOutput {
        /// The decoded line without its trailing newline.
        text: String,
    },
}
