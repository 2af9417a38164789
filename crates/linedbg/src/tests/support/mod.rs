//! Shared fixtures and helpers for session tests.

mod fake_debugger;
mod recording_sink;

pub use fake_debugger::{FakeDebugger, pump_until};
pub use recording_sink::{RecordingSink, SinkCall};
