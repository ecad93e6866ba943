//! Tracing subscriber setup for hosts embedding the engine.
//!
//! The engine only emits `tracing` events. A host that has no subscriber of
//! its own can call [`init`] once at startup.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`LoggingError::Install`] if a global subscriber is already set.
pub fn init() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
