//! Startup task model.
//!
//! A [`StartupTask`] is a named, phase-tagged, one-shot side effect. Tasks
//! carry their own failure classification ([`FailurePolicy`]) and an optional
//! soft time budget; the orchestrator owns ordering and execution.

use std::fmt;
use std::time::Duration;

use crate::error::TaskError;
use crate::types::{FailurePolicy, Phase, TaskName};

/// What a task's closure reports on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The side effect ran.
    Done,
    /// The side effect was intentionally not performed (capability absent,
    /// nothing to do). Reported as success, never an error.
    Skipped,
}

type TaskFn = Box<dyn FnOnce() -> Result<TaskStatus, TaskError>>;

/// A single startup task. No side effect occurs until the orchestrator's
/// `run` reaches it.
pub struct StartupTask {
    name: TaskName,
    phase: Phase,
    policy: FailurePolicy,
    budget: Option<Duration>,
    run: TaskFn,
}

impl StartupTask {
    /// Build a non-fatal task with no time budget.
    pub fn new(
        name: impl Into<TaskName>,
        phase: Phase,
        run: impl FnOnce() -> Result<TaskStatus, TaskError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            phase,
            policy: FailurePolicy::NonFatal,
            budget: None,
            run: Box::new(run),
        }
    }

    /// Mark the task fatal: failure aborts the remaining tasks of its phase
    /// and propagates out of `run`.
    pub fn fatal(mut self) -> Self {
        self.policy = FailurePolicy::Fatal;
        self
    }

    /// Attach a soft time budget. Synchronous tasks cannot be preempted;
    /// overruns are logged, not aborted.
    pub fn budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn name(&self) -> &TaskName {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Soft time budget, if any; the orchestrator's default applies
    /// otherwise.
    pub fn time_budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Consume the task and execute its side effect.
    pub(crate) fn execute(self) -> Result<TaskStatus, TaskError> {
        (self.run)()
    }
}

impl fmt::Debug for StartupTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupTask")
            .field("name", &self.name)
            .field("phase", &self.phase)
            .field("policy", &self.policy)
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
