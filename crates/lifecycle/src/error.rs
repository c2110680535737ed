use std::fmt;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed step: its configured error message and the underlying cause.
pub struct StepFailure {
    pub message: String,
    pub error: anyhow::Error,
}

impl fmt::Debug for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.message, self.error)
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.message, self.error)
    }
}

/// First startup step failure. No later startup step has run.
#[derive(Debug, Error)]
#[error("startup failed: {message}")]
pub struct StartupError {
    pub message: String,
    #[source]
    pub source: BoxError,
}

/// Every failed shutdown step, in execution order. All steps have run.
#[derive(Debug, Error)]
#[error("shutdown finished with {} failed step(s)", .failures.len())]
pub struct ShutdownError {
    pub failures: Vec<StepFailure>,
}

/// The main operation failed (cancellation is not an error).
#[derive(Debug, Error)]
#[error("main operation failed")]
pub struct RunError {
    #[source]
    pub source: BoxError,
}

impl RunError {
    pub(crate) fn new(error: anyhow::Error) -> Self {
        Self {
            source: error.into(),
        }
    }
}
