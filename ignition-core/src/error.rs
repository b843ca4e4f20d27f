//! Error types for ignition-core.

use thiserror::Error;

use crate::types::{Phase, State, TaskName};

/// Boxed error produced by a startup task's side effect.
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can arise from orchestrator registration and execution.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Two tasks with the same name were registered in the same phase.
    /// Programmer error; fail fast.
    #[error("duplicate task '{name}' in phase {phase}")]
    DuplicateTask { name: TaskName, phase: Phase },

    /// `register` was called after `run` began. Task registration is only
    /// permitted while the orchestrator is uninitialized.
    #[error("cannot register task '{name}' while orchestrator is {state}")]
    LateRegistration { name: TaskName, state: State },

    /// `run` was called a second time. Startup executes at most once per
    /// process lifetime.
    #[error("startup orchestrator already ran; run() is once per process")]
    AlreadyRan,

    /// A fatal task's side effect failed; startup was aborted.
    #[error("startup task '{name}' failed: {source}")]
    TaskExecution {
        name: TaskName,
        #[source]
        source: TaskError,
    },
}

/// Errors surfaced by platform collaborators (splash host, notification
/// service). `Unsupported` is always handled as a silent skip by channel
/// tasks and never reaches the user.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The capability backing this call is absent on the running platform.
    #[error("platform does not support {feature}")]
    Unsupported { feature: &'static str },

    /// The platform service accepted the call but reported a fault.
    #[error("platform service error: {0}")]
    Service(String),
}
