//! Behavioural and integration tests for the debugger driver.

#[cfg(unix)]
mod process_behaviour;
mod support;
