//! Front-end driver for an external line debugger.
//!
//! The crate owns one debugger subprocess per [`DebugSession`], speaks the
//! debugger's newline-delimited text protocol, and keeps a bidirectional
//! registry of confirmed breakpoints. Everything the host editor must do in
//! response (tagging breakpoint lines, moving to the execution position,
//! showing raw output) goes through the [`DocumentSink`] capability the host
//! injects at construction, so the crate never holds a reference to the host
//! application itself.
//!
//! # Architecture
//!
//! - [`supervisor`]: spawns, interrupts, and kills the debugger process and
//!   forwards its output from a background reader thread.
//! - [`protocol`]: splits output into lines and classifies them into
//!   [`ProtocolEvent`] values.
//! - [`registry`]: the `index <-> (file, line)` breakpoint bookkeeping.
//! - [`command`]: the debugger's command vocabulary and wire text.
//! - [`session`]: composes the above with a [`DocumentSink`].
//!
//! Commands are fire-and-forget. The debugger offers no request identifiers,
//! so responses are recognised only by the shape of the lines it prints.
//!
//! # Example
//!
//! ```rust,no_run
//! use linedbg::{DebugSession, SessionConfig};
//! # use linedbg::{DocumentId, DocumentSink, TagRange, TagStyle};
//! # struct Host;
//! # impl DocumentSink for Host {
//! #     fn charset(&self) -> Option<&str> { None }
//! #     fn lookup(&self, _: &str) -> Option<DocumentId> { None }
//! #     fn tag_add(&mut self, _: DocumentId, _: &str, _: TagRange) {}
//! #     fn tag_delete(&mut self, _: DocumentId, _: &str) {}
//! #     fn tag_config(&mut self, _: DocumentId, _: &str, _: &TagStyle) {}
//! #     fn set_line(&mut self, _: DocumentId, _: u32) {}
//! #     fn diagnostic(&mut self, _: &str) {}
//! #     fn status(&mut self, _: &str) {}
//! # }
//!
//! let mut session = DebugSession::new(Host, SessionConfig::default());
//! session.start("/work/app.py", &[])?;
//! session.set_breakpoint("/work/app.py", 10)?;
//! session.continue_execution()?;
//! session.pump();
//! # Ok::<(), linedbg::SessionError>(())
//! ```

pub mod breakpoint;
pub mod command;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod sink;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use self::breakpoint::{Breakpoint, Location};
pub use self::command::Command;
pub use self::protocol::{LineReader, ProtocolEvent};
pub use self::registry::{BreakpointRegistry, RegistryError};
pub use self::session::{DebugSession, SessionConfig, SessionError};
pub use self::sink::{DocumentId, DocumentSink, TagRange, TagStyle};
pub use self::supervisor::{LaunchSpec, OutputNotifier, ProcessSupervisor, SupervisorError};
