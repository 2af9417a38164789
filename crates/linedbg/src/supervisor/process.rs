//! Spawning, signalling, and killing the debugger process.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, TryRecvError};

use tracing::{debug, info, warn};

use super::SUPERVISOR_TARGET;
use super::config::LaunchSpec;
use super::error::SupervisorError;
use super::output::{OutputChunk, OutputNotifier, spawn_reader};
use super::state::{ProcessState, RunningProcess};

/// Owns at most one debugger process.
///
/// Starting a new process always terminates the previous one first.
pub struct ProcessSupervisor {
    state: ProcessState,
    notifier: Option<OutputNotifier>,
}

impl ProcessSupervisor {
    /// Creates a supervisor with no process.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ProcessState::Idle,
            notifier: None,
        }
    }

    /// Registers the callback invoked whenever output is queued.
    ///
    /// Applies to processes started after the call.
    pub fn set_notifier(&mut self, notifier: OutputNotifier) {
        self.notifier = Some(notifier);
    }

    /// Whether a process is currently tracked.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running(_))
    }

    /// Process identifier of the tracked process.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        match &self.state {
            ProcessState::Running(process) => Some(process.child.id()),
            ProcessState::Idle => None,
        }
    }

    /// Terminates any running process, then spawns `spec`.
    ///
    /// Standard error is merged into standard output and the child leads its
    /// own process group. On failure no process is tracked.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::BinaryNotFound`] when the program does not
    /// exist and [`SupervisorError::SpawnFailed`] for other spawn failures.
    pub fn start(&mut self, spec: &LaunchSpec) -> Result<u32, SupervisorError> {
        self.terminate();

        let program = spec.program.display().to_string();
        debug!(
            target: SUPERVISOR_TARGET,
            command = %program,
            args = ?spec.args,
            "spawning debugger process"
        );

        let (output_reader, output_writer) =
            std::io::pipe().map_err(|error| SupervisorError::spawn(&program, error))?;
        let error_writer = output_writer
            .try_clone()
            .map_err(|error| SupervisorError::spawn(&program, error))?;

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(output_writer)
            .stderr(error_writer);

        if let Some(dir) = &spec.working_dir {
            command.current_dir(dir);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let spawned = command.spawn();
        // The command holds the parent's copies of the pipe's write end; they
        // must close so the reader sees end of file when the child exits.
        drop(command);
        let mut child = spawned.map_err(|error| SupervisorError::spawn(&program, error))?;

        let Some(stdin) = child.stdin.take() else {
            abandon(&mut child);
            return Err(SupervisorError::SpawnFailed {
                message: String::from("failed to capture stdin"),
                source: std::sync::Arc::new(std::io::Error::other("no stdin")),
            });
        };

        let (sender, receiver) = mpsc::channel();
        if let Err(error) = spawn_reader(output_reader, sender, self.notifier.clone()) {
            abandon(&mut child);
            return Err(SupervisorError::SpawnFailed {
                message: String::from("failed to start output reader"),
                source: std::sync::Arc::new(error),
            });
        }

        let pid = child.id();
        info!(
            target: SUPERVISOR_TARGET,
            pid,
            command = %program,
            "debugger process spawned"
        );

        self.state = ProcessState::Running(RunningProcess {
            child,
            stdin,
            output: receiver,
        });
        Ok(pid)
    }

    /// Kills the tracked process and reaps it.
    ///
    /// Returns whether a process was tracked. Calling this with no process is
    /// a no-op.
    pub fn terminate(&mut self) -> bool {
        let ProcessState::Running(mut process) =
            std::mem::replace(&mut self.state, ProcessState::Idle)
        else {
            return false;
        };

        let pid = process.child.id();
        match process.child.try_wait() {
            Ok(Some(status)) => {
                debug!(
                    target: SUPERVISOR_TARGET,
                    pid,
                    ?status,
                    "debugger process had already exited"
                );
            }
            Ok(None) | Err(_) => {
                if let Err(error) = process.child.kill() {
                    warn!(
                        target: SUPERVISOR_TARGET,
                        pid,
                        error = %error,
                        "failed to kill debugger process"
                    );
                }
                if let Err(error) = process.child.wait() {
                    warn!(
                        target: SUPERVISOR_TARGET,
                        pid,
                        error = %error,
                        "failed to reap debugger process"
                    );
                }
                info!(target: SUPERVISOR_TARGET, pid, "debugger process killed");
            }
        }
        true
    }

    /// Sends `SIGINT` to the debugger's process group.
    ///
    /// This interrupts a running debuggee and returns control to the
    /// debugger prompt. It is a no-op when no process is tracked.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::Signal`] when the signal cannot be
    /// delivered.
    pub fn interrupt(&self) -> Result<(), SupervisorError> {
        let Some(pid) = self.pid() else {
            return Ok(());
        };
        debug!(target: SUPERVISOR_TARGET, pid, "interrupting debugger process group");
        signal_interrupt(pid)
    }

    /// Writes `bytes` to the debugger's standard input and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::NotRunning`] without a process and
    /// [`SupervisorError::Io`] when the write fails.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), SupervisorError> {
        let ProcessState::Running(process) = &mut self.state else {
            return Err(SupervisorError::NotRunning);
        };
        process
            .stdin
            .write_all(bytes)
            .and_then(|()| process.stdin.flush())
            .map_err(SupervisorError::io)
    }

    /// Drains every output chunk queued so far without blocking.
    pub fn drain_output(&mut self) -> Vec<OutputChunk> {
        let ProcessState::Running(process) = &self.state else {
            return Vec::new();
        };
        let mut chunks = Vec::new();
        loop {
            match process.output.try_recv() {
                Ok(chunk) => chunks.push(chunk),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if chunks.last() != Some(&OutputChunk::Closed) {
                        chunks.push(OutputChunk::Closed);
                    }
                    break;
                }
            }
        }
        chunks
    }
}

/// Kills and reaps a child that never became the tracked process.
fn abandon(child: &mut Child) {
    if let Err(error) = child.kill().and_then(|()| child.wait()) {
        debug!(
            target: SUPERVISOR_TARGET,
            pid = child.id(),
            error = %error,
            "failed to clean up half-started debugger process"
        );
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessSupervisor {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl std::fmt::Debug for ProcessSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.pid() {
            Some(pid) => format!("running (pid: {pid})"),
            None => String::from("idle"),
        };
        f.debug_struct("ProcessSupervisor")
            .field("state", &state)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

#[cfg(unix)]
fn signal_interrupt(pid: u32) -> Result<(), SupervisorError> {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let raw = i32::try_from(pid).map_err(|_| SupervisorError::Signal {
        pid,
        message: String::from("pid out of range"),
    })?;
    killpg(Pid::from_raw(raw), Signal::SIGINT).map_err(|errno| SupervisorError::Signal {
        pid,
        message: errno.to_string(),
    })
}

#[cfg(not(unix))]
fn signal_interrupt(pid: u32) -> Result<(), SupervisorError> {
    Err(SupervisorError::Signal {
        pid,
        message: String::from("process-group signals are only supported on unix"),
    })
}
