use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Interpreter used to host the debugger module.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Module passed to `-m` when launching the debugger.
pub const DEFAULT_DEBUGGER_MODULE: &str = "pdb";

/// Encoding label used when the host reports no charset of its own.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Background colour applied to breakpoint tags.
pub const DEFAULT_BREAKPOINT_BACKGROUND: &str = "blue";

/// Foreground colour applied to breakpoint tags.
pub const DEFAULT_BREAKPOINT_FOREGROUND: &str = "yellow";

/// Default log filter expression used by the binary.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned interpreter name for serde defaults.
#[must_use]
pub fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_owned()
}

/// Owned debugger module name for serde defaults.
#[must_use]
pub fn default_debugger_module() -> String {
    DEFAULT_DEBUGGER_MODULE.to_owned()
}

/// Owned encoding label for serde defaults.
#[must_use]
pub fn default_encoding() -> String {
    DEFAULT_ENCODING.to_owned()
}

/// Owned breakpoint background colour for serde defaults.
#[must_use]
pub fn default_breakpoint_background() -> String {
    DEFAULT_BREAKPOINT_BACKGROUND.to_owned()
}

/// Owned breakpoint foreground colour for serde defaults.
#[must_use]
pub fn default_breakpoint_foreground() -> String {
    DEFAULT_BREAKPOINT_FOREGROUND.to_owned()
}
