use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

type StepAction = Box<dyn FnOnce() -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// One startup or shutdown operation with the messages logged on success and on failure.
///
/// Synchronous and asynchronous actions are normalised into the same deferred future at
/// construction; nothing runs until the manager executes the step.
pub struct LifecycleStep {
    pub(crate) action: StepAction,
    pub(crate) success_message: String,
    pub(crate) error_message: String,
}

impl LifecycleStep {
    /// Step from an async operation.
    pub fn new<F, Fut>(
        action: F,
        success_message: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            action: Box::new(move || Box::pin(action())),
            success_message: success_message.into(),
            error_message: error_message.into(),
        }
    }

    /// Step from a synchronous operation.
    pub fn from_fn<F>(
        action: F,
        success_message: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        Self::new(
            move || async move { action() },
            success_message,
            error_message,
        )
    }

    /// Shutdown step releasing the resource called `name`.
    pub fn disposal<F, Fut>(name: &str, action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::new(
            action,
            format!("{name} has been disposed"),
            format!("Failed to dispose {name}"),
        )
    }

    pub fn success_message(&self) -> &str {
        &self.success_message
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }
}

impl fmt::Debug for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleStep")
            .field("success_message", &self.success_message)
            .field("error_message", &self.error_message)
            .finish_non_exhaustive()
    }
}
