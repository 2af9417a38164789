//! A debugging session bound to one host attachment point.
//!
//! [`DebugSession`] owns the supervised debugger process, the line reader,
//! and the breakpoint registry, and reflects protocol events onto the
//! injected [`DocumentSink`]. Hosts construct one session per attachment
//! point and route their UI events to it; there is no global instance.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use linedbg_config::Config;

use crate::breakpoint::{Location, tag_name};
use crate::command::Command;
use crate::protocol::{LineReader, ProtocolEvent};
use crate::registry::{BreakpointRegistry, RegistryError};
use crate::sink::{DocumentSink, TagRange, TagStyle};
use crate::supervisor::{
    LaunchSpec, OutputChunk, OutputNotifier, ProcessSupervisor, SupervisorError,
};

/// Log target for session operations.
pub(crate) const SESSION_TARGET: &str = "linedbg::session";

/// Errors surfaced by session operations.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The debugger process could not be started, signalled, or written to.
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),

    /// A breakpoint lookup missed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// User-supplied arguments could not be split with shell quoting rules.
    #[error("invalid debugger arguments: {input}")]
    InvalidArguments {
        /// The argument string as typed.
        input: String,
    },
}

/// How a session launches and presents the debugger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Interpreter hosting the debugger module.
    pub interpreter: String,
    /// Module passed to `-m`.
    pub debugger_module: String,
    /// Encoding label used when the host reports no charset.
    pub encoding: String,
    /// Style applied to breakpoint tags.
    pub breakpoint_style: TagStyle,
    /// Working directory of the debugger process.
    pub working_dir: Option<PathBuf>,
}

impl SessionConfig {
    /// Session settings taken from the resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            interpreter: config.interpreter().to_owned(),
            debugger_module: config.debugger_module().to_owned(),
            encoding: config.encoding().to_owned(),
            breakpoint_style: TagStyle::from_config(config),
            working_dir: None,
        }
    }

    /// Sets the working directory of launched debugger processes.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A debugger front-end for one host attachment point.
pub struct DebugSession<S: DocumentSink> {
    sink: S,
    config: SessionConfig,
    supervisor: ProcessSupervisor,
    reader: LineReader,
    registry: BreakpointRegistry,
    output_closed: bool,
}

impl<S: DocumentSink> DebugSession<S> {
    /// Attaches a session to `sink`.
    ///
    /// Output is decoded with the sink's charset, or the configured fallback
    /// encoding when the sink reports none.
    #[must_use]
    pub fn new(sink: S, config: SessionConfig) -> Self {
        let reader = LineReader::new(sink.charset().unwrap_or(&config.encoding));
        Self {
            sink,
            config,
            supervisor: ProcessSupervisor::new(),
            reader,
            registry: BreakpointRegistry::new(),
            output_closed: false,
        }
    }

    /// Registers the callback invoked when debugger output is ready to pump.
    #[must_use]
    pub fn with_notifier(mut self, notifier: OutputNotifier) -> Self {
        self.supervisor.set_notifier(notifier);
        self
    }

    /// The injected host capability.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the injected host capability.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Breakpoints confirmed during the current session.
    #[must_use]
    pub const fn registry(&self) -> &BreakpointRegistry {
        &self.registry
    }

    /// Whether a debugger process is live.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.supervisor.is_running()
    }

    /// Whether the live debugger has closed its output, which happens when
    /// it exits on its own.
    #[must_use]
    pub const fn output_closed(&self) -> bool {
        self.output_closed
    }

    /// Process identifier of the live debugger.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.supervisor.pid()
    }

    /// Starts debugging `target`, superseding any running session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Supervisor`] when the debugger cannot be
    /// spawned. The session is then left with no process and no breakpoints.
    pub fn start(&mut self, target: &str, user_args: &[String]) -> Result<u32, SessionError> {
        let pid = self.launch(target, user_args)?;
        self.sink.status("Debug started !");
        Ok(pid)
    }

    /// Starts debugging `target` with arguments typed as one string.
    ///
    /// The string is split with shell quoting rules before anything is
    /// killed, so a malformed string leaves the running session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidArguments`] for unbalanced quoting and
    /// [`SessionError::Supervisor`] when the debugger cannot be spawned.
    pub fn start_with_args(&mut self, target: &str, raw_args: &str) -> Result<u32, SessionError> {
        let Some(user_args) = shlex::split(raw_args) else {
            self.sink.status("Debug failed to start: invalid arguments");
            return Err(SessionError::InvalidArguments {
                input: raw_args.to_owned(),
            });
        };
        let pid = self.launch(target, &user_args)?;
        self.sink.status(&format!("Debug started ! Args: {raw_args}"));
        Ok(pid)
    }

    /// Kills the debugger and forgets every breakpoint.
    ///
    /// Safe to call with no process running.
    pub fn terminate(&mut self) {
        if self.supervisor.terminate() {
            info!(target: SESSION_TARGET, "debug session terminated");
        }
        self.sweep_breakpoints();
        self.reader = LineReader::with_encoding(self.reader.encoding());
        self.output_closed = false;
        self.sink.status("Debug finished !");
    }

    /// Interrupts the debuggee so the debugger prompt regains control.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Supervisor`] when the signal cannot be sent.
    pub fn interrupt(&self) -> Result<(), SessionError> {
        self.supervisor.interrupt().map_err(SessionError::from)
    }

    /// Writes `command` to the debugger.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Supervisor`] when no debugger is running or
    /// the write fails.
    pub fn send(&mut self, command: &Command) -> Result<(), SessionError> {
        let text = command.wire_text();
        let (bytes, _, _) = self.reader.encoding().encode(&text);
        debug!(
            target: SESSION_TARGET,
            command = command.name(),
            bytes = bytes.len(),
            "sending debugger command"
        );
        self.supervisor.write(&bytes).map_err(SessionError::from)
    }

    /// Asks the debugger for a breakpoint at `file:line`.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn set_breakpoint(&mut self, file: &str, line: u32) -> Result<(), SessionError> {
        self.send(&Command::Break {
            file: file.to_owned(),
            line,
        })
    }

    /// Asks the debugger for a one-shot breakpoint at `file:line`.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn set_temporary_breakpoint(&mut self, file: &str, line: u32) -> Result<(), SessionError> {
        self.send(&Command::TemporaryBreak {
            file: file.to_owned(),
            line,
        })
    }

    /// Steps into the next line.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn step(&mut self) -> Result<(), SessionError> {
        self.send(&Command::Step)
    }

    /// Continues until the next breakpoint.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn continue_execution(&mut self) -> Result<(), SessionError> {
        self.send(&Command::Continue)
    }

    /// Prints the call stack.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn show_stack(&mut self) -> Result<(), SessionError> {
        self.send(&Command::Where)
    }

    /// Prints the arguments of the current frame.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn show_args(&mut self) -> Result<(), SessionError> {
        self.send(&Command::Args)
    }

    /// Evaluates `expression` in the current frame.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn evaluate(&mut self, expression: &str) -> Result<(), SessionError> {
        self.send(&Command::Evaluate {
            expression: expression.to_owned(),
        })
    }

    /// Executes `statement` in the current frame.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`].
    pub fn execute(&mut self, statement: &str) -> Result<(), SessionError> {
        self.send(&Command::Execute {
            statement: statement.to_owned(),
        })
    }

    /// Asks the debugger to clear the breakpoint tracked at `file:line`.
    ///
    /// The registry entry and tag are dropped when the debugger confirms the
    /// deletion. Returns the index that was sent.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Registry`] when no breakpoint is tracked at
    /// the location; nothing is sent in that case.
    pub fn clear_breakpoint_at(&mut self, file: &str, line: u32) -> Result<u32, SessionError> {
        let index = self.registry.remove_at(file, line)?;
        self.send(&Command::Clear { index })?;
        Ok(index)
    }

    /// Clears every breakpoint in the debugger and locally.
    ///
    /// # Errors
    ///
    /// See [`DebugSession::send`]. Local state is left as it was when the
    /// command cannot be written.
    pub fn clear_all_breakpoints(&mut self) -> Result<(), SessionError> {
        self.send(&Command::ClearAll)?;
        self.sweep_breakpoints();
        Ok(())
    }

    /// Processes all debugger output queued so far.
    ///
    /// Never blocks. Returns the events that were applied, in order.
    pub fn pump(&mut self) -> Vec<ProtocolEvent> {
        let mut events = Vec::new();
        for chunk in self.supervisor.drain_output() {
            match chunk {
                OutputChunk::Data(bytes) => events.extend(self.handle_output(&bytes)),
                OutputChunk::Closed => {
                    if self.output_closed {
                        continue;
                    }
                    self.output_closed = true;
                    info!(target: SESSION_TARGET, "debugger output closed");
                    if let Some(event) = self.reader.finish() {
                        self.apply(&event);
                        events.push(event);
                    }
                }
            }
        }
        events
    }

    /// Feeds raw debugger output through the reader and applies the events.
    pub fn handle_output(&mut self, bytes: &[u8]) -> Vec<ProtocolEvent> {
        let events = self.reader.feed(bytes);
        for event in &events {
            self.apply(event);
        }
        events
    }

    fn launch(&mut self, target: &str, user_args: &[String]) -> Result<u32, SessionError> {
        self.supervisor.terminate();
        self.sweep_breakpoints();
        self.reader = LineReader::with_encoding(self.reader.encoding());
        self.output_closed = false;

        let mut spec = LaunchSpec::debugger(
            &self.config.interpreter,
            &self.config.debugger_module,
            target,
            user_args,
        );
        if let Some(dir) = &self.config.working_dir {
            spec = spec.with_working_dir(dir);
        }

        self.supervisor.start(&spec).map_err(|error| {
            warn!(
                target: SESSION_TARGET,
                target_file = target,
                error = %error,
                "debugger failed to start"
            );
            self.sink.status(&format!("Debug failed to start: {error}"));
            SessionError::from(error)
        })
    }

    fn apply(&mut self, event: &ProtocolEvent) {
        match event {
            ProtocolEvent::LineEvent { file, line } => match self.sink.lookup(file) {
                Some(document) => self.sink.set_line(document, *line),
                None => debug!(
                    target: SESSION_TARGET,
                    file = %file,
                    line,
                    "stopped in a file that is not open"
                ),
            },
            ProtocolEvent::BreakpointAdded { index, file, line } => {
                let location = Location::new(file.clone(), *line);
                for displaced in self.registry.add(*index, location) {
                    self.untag(displaced.index, &displaced.location.file);
                }
                self.tag(*index, file, *line);
            }
            ProtocolEvent::BreakpointDeleted { index } => match self.registry.remove(*index) {
                Some(location) => self.untag(*index, &location.file),
                None => warn!(
                    target: SESSION_TARGET,
                    index,
                    "debugger deleted a breakpoint that was not tracked"
                ),
            },
            ProtocolEvent::RawOutput { text } => self.sink.diagnostic(text),
        }
    }

    fn tag(&mut self, index: u32, file: &str, line: u32) {
        let Some(document) = self.sink.lookup(file) else {
            debug!(
                target: SESSION_TARGET,
                index,
                file,
                "breakpoint set in a file that is not open"
            );
            return;
        };
        let name = tag_name(index);
        self.sink.tag_add(document, &name, TagRange::whole_line(line));
        self.sink
            .tag_config(document, &name, &self.config.breakpoint_style);
    }

    fn untag(&mut self, index: u32, file: &str) {
        if let Some(document) = self.sink.lookup(file) {
            self.sink.tag_delete(document, &tag_name(index));
        }
    }

    fn sweep_breakpoints(&mut self) {
        for breakpoint in self.registry.clear() {
            self.untag(breakpoint.index, &breakpoint.location.file);
        }
    }
}
