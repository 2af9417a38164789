//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use linedbg::SessionError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to start debugger: {0}")]
    Start(SessionError),
    #[error("failed to read commands from stdin: {0}")]
    SpawnInput(io::Error),
}
