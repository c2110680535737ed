use std::future::Future;

use futures::future::BoxFuture;
use tracing::{error, info, instrument, warn};

use crate::error::{RunError, ShutdownError, StartupError, StepFailure};
use crate::step::LifecycleStep;

/// The long-lived operation awaited by [`LifecycleManager::run`] (e.g. the bot polling loop).
pub type MainOperation = BoxFuture<'static, anyhow::Result<()>>;

/// `Created → Starting → Running → ShuttingDown → Stopped`, or `Starting → StartupFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Created,
    Starting,
    StartupFailed,
    Running,
    ShuttingDown,
    Stopped,
}

/// How [`LifecycleManager::run`] ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The main operation returned `Ok`.
    Completed,
    /// The shutdown signal fired first; the main operation was dropped.
    Cancelled,
}

/// Runs ordered startup steps, the main operation, then ordered shutdown steps.
///
/// Steps are one-shot: each runs at most once for the lifetime of the manager.
pub struct LifecycleManager {
    startup_steps: Vec<LifecycleStep>,
    shutdown_steps: Vec<LifecycleStep>,
    main_operation: Option<MainOperation>,
    phase: LifecyclePhase,
}

impl LifecycleManager {
    /// Creates a manager. `shutdown_steps` run in the given order, so pass them in reverse of
    /// acquisition (or use [`LifecycleBuilder`], which does that).
    pub fn new(
        startup_steps: Vec<LifecycleStep>,
        shutdown_steps: Vec<LifecycleStep>,
        main_operation: MainOperation,
    ) -> Self {
        Self {
            startup_steps,
            shutdown_steps,
            main_operation: Some(main_operation),
            phase: LifecyclePhase::Created,
        }
    }

    pub fn builder() -> LifecycleBuilder {
        LifecycleBuilder::default()
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Runs startup steps in order, failing fast on the first error. Only valid from `Created`.
    #[instrument(skip(self))]
    pub async fn on_startup(&mut self) -> Result<(), StartupError> {
        if self.phase != LifecyclePhase::Created {
            return Err(StartupError {
                message: format!("cannot start from phase {:?}", self.phase),
                source: anyhow::anyhow!("startup has already been attempted").into(),
            });
        }
        self.phase = LifecyclePhase::Starting;

        for step in std::mem::take(&mut self.startup_steps) {
            let LifecycleStep {
                action,
                success_message,
                error_message,
            } = step;

            match action().await {
                Ok(()) => info!("{}", success_message),
                Err(e) => {
                    error!(error = %format!("{e:#}"), "{}", error_message);
                    self.phase = LifecyclePhase::StartupFailed;
                    return Err(StartupError {
                        message: error_message,
                        source: e.into(),
                    });
                }
            }
        }

        self.phase = LifecyclePhase::Running;
        Ok(())
    }

    /// Awaits the main operation until it finishes or `shutdown_signal` resolves.
    ///
    /// A fired signal is a clean exit ([`RunOutcome::Cancelled`]); an `Err` from the main operation
    /// is a [`RunError`]. Requires a successful [`LifecycleManager::on_startup`].
    #[instrument(skip(self, shutdown_signal))]
    pub async fn run<S>(&mut self, shutdown_signal: S) -> Result<RunOutcome, RunError>
    where
        S: Future<Output = ()>,
    {
        if self.phase != LifecyclePhase::Running {
            return Err(RunError::new(anyhow::anyhow!(
                "cannot run the main operation from phase {:?}",
                self.phase
            )));
        }
        let Some(main_operation) = self.main_operation.take() else {
            return Err(RunError::new(anyhow::anyhow!(
                "main operation has already been run"
            )));
        };

        tokio::select! {
            result = main_operation => match result {
                Ok(()) => {
                    info!("Main operation completed");
                    Ok(RunOutcome::Completed)
                }
                Err(e) => {
                    error!(error = %format!("{e:#}"), "Main operation failed");
                    Err(RunError::new(e))
                }
            },
            _ = shutdown_signal => {
                warn!("Main operation interrupted by shutdown signal");
                Ok(RunOutcome::Cancelled)
            }
        }
    }

    /// Runs every shutdown step in order; failures are logged, collected, and reported together.
    #[instrument(skip(self))]
    pub async fn on_shutdown(&mut self) -> Result<(), ShutdownError> {
        self.phase = LifecyclePhase::ShuttingDown;
        let mut failures = Vec::new();

        for step in std::mem::take(&mut self.shutdown_steps) {
            let LifecycleStep {
                action,
                success_message,
                error_message,
            } = step;

            match action().await {
                Ok(()) => info!("{}", success_message),
                Err(e) => {
                    error!(error = %format!("{e:#}"), "{}", error_message);
                    failures.push(StepFailure {
                        message: error_message,
                        error: e,
                    });
                }
            }
        }

        self.phase = LifecyclePhase::Stopped;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ShutdownError { failures })
        }
    }
}

/// Collects steps while resources are acquired. Shutdown steps are registered in acquisition order
/// and reversed by [`LifecycleBuilder::build`], so the last resource opened is the first closed.
#[derive(Default)]
pub struct LifecycleBuilder {
    startup_steps: Vec<LifecycleStep>,
    shutdown_steps: Vec<LifecycleStep>,
}

impl LifecycleBuilder {
    pub fn startup_step(mut self, step: LifecycleStep) -> Self {
        self.startup_steps.push(step);
        self
    }

    pub fn startup_steps<I>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = LifecycleStep>,
    {
        self.startup_steps.extend(steps);
        self
    }

    /// Registers the release of a resource that has just been acquired.
    pub fn shutdown_step(mut self, step: LifecycleStep) -> Self {
        self.shutdown_steps.push(step);
        self
    }

    pub fn build(self, main_operation: MainOperation) -> LifecycleManager {
        let mut shutdown_steps = self.shutdown_steps;
        shutdown_steps.reverse();
        LifecycleManager::new(self.startup_steps, shutdown_steps, main_operation)
    }
}
