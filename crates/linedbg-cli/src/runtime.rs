//! The interactive loop tying operator input to the debug session.
//!
//! Two producers feed one channel consumed on the calling thread: the input
//! thread forwards lines typed by the operator, and the session's output
//! notifier signals that debugger output is ready to pump. All session state
//! is therefore touched from a single thread.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use linedbg::{DebugSession, DocumentSink, OutputNotifier, SessionConfig, SessionError};
use linedbg_config::Config;
use tracing::{debug, info, warn};

use crate::command::{self, ReplCommand};
use crate::errors::AppError;
use crate::host::{TerminalHost, resolve_file};

const RUNTIME_TARGET: &str = "linedbg::cli::runtime";

/// Messages consumed by the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoopEvent {
    /// A line typed by the operator.
    Input(String),
    /// The operator's input reached end of file.
    InputClosed,
    /// Debugger output is queued.
    Output,
}

/// Whether the loop keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Session state driven by the interactive loop.
pub(crate) struct Repl<W: Write> {
    session: DebugSession<TerminalHost<W>>,
    target: String,
}

impl<W: Write> Repl<W> {
    pub(crate) fn new(config: &Config, target: &str, writer: W) -> Self {
        let resolved = resolve_file(target);
        let mut host = TerminalHost::new(writer);
        host.open(&resolved);
        Self {
            session: DebugSession::new(host, SessionConfig::from_config(config)),
            target: resolved,
        }
    }

    #[must_use]
    pub(crate) fn with_notifier(mut self, notifier: OutputNotifier) -> Self {
        self.session = self.session.with_notifier(notifier);
        self
    }

    #[cfg(test)]
    pub(crate) const fn session(&self) -> &DebugSession<TerminalHost<W>> {
        &self.session
    }

    /// Starts the target with `arguments`.
    pub(crate) fn start(&mut self, arguments: &[String]) -> Result<u32, SessionError> {
        self.session.start(&self.target, arguments)
    }

    /// Applies one loop event.
    pub(crate) fn handle(&mut self, event: LoopEvent) -> Flow {
        match event {
            LoopEvent::Output => {
                self.session.pump();
                if self.session.output_closed() && self.session.is_running() {
                    info!(target: RUNTIME_TARGET, "debugger exited");
                    self.session.terminate();
                }
                Flow::Continue
            }
            LoopEvent::InputClosed => Flow::Exit,
            LoopEvent::Input(line) => match command::parse(&line) {
                Ok(None) => Flow::Continue,
                Ok(Some(parsed)) => self.execute(parsed).unwrap_or_else(|error| {
                    self.session.sink_mut().status(&error.to_string());
                    Flow::Continue
                }),
                Err(error) => {
                    self.session.sink_mut().status(&error.to_string());
                    Flow::Continue
                }
            },
        }
    }

    /// Terminates the debugger if one is still live.
    pub(crate) fn shutdown(&mut self) {
        if self.session.is_running() {
            self.session.terminate();
        }
    }

    fn execute(&mut self, command: ReplCommand) -> Result<Flow, SessionError> {
        debug!(target: RUNTIME_TARGET, command = ?command, "operator command");
        match command {
            ReplCommand::Run { args } => {
                // Failures are already reported on the status line.
                if let Err(error) = self.session.start_with_args(&self.target, &args) {
                    debug!(target: RUNTIME_TARGET, error = %error, "restart failed");
                }
            }
            ReplCommand::Break(location) => {
                let file = self.open(&location.file);
                self.session.set_breakpoint(&file, location.line)?;
            }
            ReplCommand::TemporaryBreak(location) => {
                let file = self.open(&location.file);
                self.session.set_temporary_breakpoint(&file, location.line)?;
            }
            ReplCommand::ClearAt(location) => {
                let file = resolve_file(&location.file);
                let index = self.session.clear_breakpoint_at(&file, location.line)?;
                self.session
                    .sink_mut()
                    .status(&format!("Clearing breakpoint {index}"));
            }
            ReplCommand::ClearAll => self.session.clear_all_breakpoints()?,
            ReplCommand::Step => self.session.step()?,
            ReplCommand::Continue => self.session.continue_execution()?,
            ReplCommand::Where => self.session.show_stack()?,
            ReplCommand::Args => self.session.show_args()?,
            ReplCommand::Evaluate { expression } => self.session.evaluate(&expression)?,
            ReplCommand::Execute { statement } => self.session.execute(&statement)?,
            ReplCommand::Interrupt => self.session.interrupt()?,
            ReplCommand::Quit => self.session.terminate(),
            ReplCommand::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn open(&mut self, file: &str) -> String {
        let resolved = resolve_file(file);
        self.session.sink_mut().open(&resolved);
        resolved
    }
}

/// Runs the interactive loop until the operator exits or input ends.
pub(crate) fn run_interactive<R, W>(
    config: &Config,
    target: &str,
    arguments: &[String],
    input: R,
    writer: W,
) -> Result<(), AppError>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (sender, events) = mpsc::channel();
    let notify = sender.clone();
    let notifier: OutputNotifier = Arc::new(move || {
        if notify.send(LoopEvent::Output).is_err() {
            debug!(target: RUNTIME_TARGET, "event loop has stopped");
        }
    });

    let mut repl = Repl::new(config, target, writer).with_notifier(notifier);
    repl.start(arguments).map_err(AppError::Start)?;
    spawn_input(input, sender).map_err(AppError::SpawnInput)?;

    while let Ok(event) = events.recv() {
        if repl.handle(event) == Flow::Exit {
            break;
        }
    }
    repl.shutdown();
    Ok(())
}

fn spawn_input<R>(input: R, events: Sender<LoopEvent>) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name(String::from("linedbg-input"))
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(text) => {
                        if events.send(LoopEvent::Input(text)).is_err() {
                            return;
                        }
                    }
                    Err(error) => {
                        warn!(target: RUNTIME_TARGET, error = %error, "failed to read input");
                        break;
                    }
                }
            }
            if events.send(LoopEvent::InputClosed).is_err() {
                debug!(target: RUNTIME_TARGET, "event loop has stopped");
            }
        })
}
