//! Errors raised while managing the debugger process.
//!
//! I/O errors are wrapped in `Arc` to keep the enum small and cloneable.

use std::sync::Arc;

use thiserror::Error;

/// Errors raised by [`crate::ProcessSupervisor`].
#[derive(Debug, Clone, Error)]
pub enum SupervisorError {
    /// The debugger executable was not found.
    #[error("debugger executable not found: {command}")]
    BinaryNotFound {
        /// The command that was not found.
        command: String,
        /// The underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The debugger process could not be spawned.
    #[error("failed to spawn debugger process: {message}")]
    SpawnFailed {
        /// Description of the spawn failure.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// No debugger process is running.
    #[error("no debugger process is running")]
    NotRunning,

    /// Writing to the debugger's standard input failed.
    #[error("I/O error communicating with the debugger: {source}")]
    Io {
        /// The underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Signalling the debugger's process group failed.
    #[error("failed to signal debugger process group {pid}: {message}")]
    Signal {
        /// Process group that was signalled.
        pid: u32,
        /// Description of the failure.
        message: String,
    },
}

impl SupervisorError {
    pub(crate) fn spawn(command: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::BinaryNotFound {
                command: command.to_owned(),
                source: Arc::new(source),
            }
        } else {
            Self::SpawnFailed {
                message: format!("failed to start {command}"),
                source: Arc::new(source),
            }
        }
    }

    pub(crate) fn io(source: std::io::Error) -> Self {
        Self::Io {
            source: Arc::new(source),
        }
    }
}
