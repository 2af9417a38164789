//! Diagnostics for the `linedbg` binary.
//!
//! Events are written to stderr and filtered by `--log-filter` or
//! `LINEDBG_LOG_FILTER`. Stdout carries the debugger transcript alone.

use std::io::{self, IsTerminal};

use linedbg_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

static INSTALLED: OnceCell<()> = OnceCell::new();

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Errors raised while setting up diagnostics.
#[derive(Debug, thiserror::Error)]
pub(crate) enum TelemetryError {
    /// The log filter is not a valid directive list.
    #[error("invalid log filter `{expression}`: {reason}")]
    Filter {
        /// The rejected expression.
        expression: String,
        /// Parser message.
        reason: String,
    },
    /// Another subscriber was registered first.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the subscriber described by `config`.
///
/// Only the first successful call takes effect. The CLI tests run many
/// sessions in one process and share that first subscriber.
pub(crate) fn initialise(config: &Config) -> Result<(), TelemetryError> {
    INSTALLED
        .get_or_try_init(|| {
            let subscriber = build_subscriber(config)?;
            tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
        })
        .map(|_| ())
}

fn parse_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter {
        expression: expression.to_owned(),
        reason: error.to_string(),
    })
}

fn build_subscriber(config: &Config) -> Result<BoxedSubscriber, TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(parse_filter(config.log_filter())?)
        .with_writer(io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true);

    Ok(match config.log_format() {
        // Machine-readable output never carries colour codes.
        LogFormat::Json => Box::new(builder.with_ansi(false).json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(
            builder
                .with_ansi(io::stderr().is_terminal())
                .compact()
                .finish(),
        ),
    })
}
