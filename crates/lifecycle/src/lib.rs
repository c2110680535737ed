//! # Lifecycle manager
//!
//! Sequences caller-owned resources through startup, a single long-lived main operation, and
//! shutdown:
//!
//! | phase    | on step failure              | remaining steps run? |
//! |----------|------------------------------|----------------------|
//! | startup  | abort with [`StartupError`]  | no                   |
//! | run      | [`RunError`] (cancel is Ok)  | n/a                  |
//! | shutdown | record, continue             | yes                  |
//!
//! The manager never owns the resources; it only runs the open/close operations supplied as
//! [`LifecycleStep`]s.

mod error;
mod manager;
mod step;

pub use error::{RunError, ShutdownError, StartupError, StepFailure};
pub use manager::{LifecycleBuilder, LifecycleManager, LifecyclePhase, MainOperation, RunOutcome};
pub use step::LifecycleStep;
