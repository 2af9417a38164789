//! Shared configuration for the `linedbg` debugger driver.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then a
//! `linedbg.toml` file (or the file named by `--config-path` /
//! `LINEDBG_CONFIG_PATH`), then `LINEDBG_*` environment variables, and finally
//! command-line flags. The resolved [`Config`] describes how the debugger
//! process is launched, how its output is decoded, how breakpoint tags are
//! styled, and how the binary reports telemetry.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_BREAKPOINT_BACKGROUND, DEFAULT_BREAKPOINT_FOREGROUND, DEFAULT_DEBUGGER_MODULE,
    DEFAULT_ENCODING, DEFAULT_INTERPRETER, DEFAULT_LOG_FILTER, default_debugger_module,
    default_encoding, default_interpreter, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

use defaults::{default_breakpoint_background, default_breakpoint_foreground};

/// Resolved configuration for a `linedbg` run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "LINEDBG")]
pub struct Config {
    /// Tracing filter expression, e.g. `info` or `linedbg::protocol=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,

    /// Output format for tracing events.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,

    /// Interpreter that hosts the debugger module.
    #[serde(default = "default_interpreter")]
    #[ortho_config(default = default_interpreter())]
    pub interpreter: String,

    /// Module launched with `-m`.
    #[serde(default = "default_debugger_module")]
    #[ortho_config(default = default_debugger_module())]
    pub debugger_module: String,

    /// Encoding label used when the host document reports no charset.
    #[serde(default = "default_encoding")]
    #[ortho_config(default = default_encoding())]
    pub encoding: String,

    /// Background colour of breakpoint tags.
    #[serde(default = "default_breakpoint_background")]
    #[ortho_config(default = default_breakpoint_background())]
    pub breakpoint_background: String,

    /// Foreground colour of breakpoint tags.
    #[serde(default = "default_breakpoint_foreground")]
    #[ortho_config(default = default_breakpoint_foreground())]
    pub breakpoint_foreground: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            interpreter: default_interpreter(),
            debugger_module: default_debugger_module(),
            encoding: default_encoding(),
            breakpoint_background: default_breakpoint_background(),
            breakpoint_foreground: default_breakpoint_foreground(),
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for tracing events.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Interpreter that hosts the debugger module.
    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Module launched with `-m`.
    #[must_use]
    pub fn debugger_module(&self) -> &str {
        &self.debugger_module
    }

    /// Fallback encoding label.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Background colour of breakpoint tags.
    #[must_use]
    pub fn breakpoint_background(&self) -> &str {
        &self.breakpoint_background
    }

    /// Foreground colour of breakpoint tags.
    #[must_use]
    pub fn breakpoint_foreground(&self) -> &str {
        &self.breakpoint_foreground
    }
}
