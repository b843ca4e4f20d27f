//! Startup orchestrator.
//!
//! Owns an ordered list of [`StartupTask`]s and executes them exactly once
//! per process lifetime, in registration order, split around the base-ready
//! checkpoint (the host bridge's own initialization).
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized → (register*) → Running(PreBase) → Running(PostBase) → Completed
//! ```
//!
//! No transition leaves `Completed`. Everything runs synchronously on the
//! calling thread: splash installation must suspend first-frame rendering on
//! the same thread that draws it, so startup is inherently single-threaded
//! and ordering-sensitive.
//!
//! # Run-twice policy
//!
//! A second `run()` fails with [`OrchestratorError::AlreadyRan`] rather than
//! silently no-opping. A double launch hook is a programmer error and should
//! be loud.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{OrchestratorError, PlatformError};
use crate::services::NotificationService;
use crate::task::{StartupTask, TaskStatus};
use crate::types::{ChannelId, FailurePolicy, NotificationChannelSpec, Phase, State, TaskName};

/// Fixed trace name for the base-ready checkpoint between the two phases.
pub const BASE_READY: &str = "base-ready";

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// How a traced step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceOutcome {
    Executed,
    Skipped,
    Failed,
}

/// One executed step in a startup run, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub name: String,
    pub phase: String,
    pub outcome: TraceOutcome,
    pub duration_ms: u128,
}

/// Summary of a completed startup run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub trace: Vec<TraceEntry>,
    pub duration_ms: u128,
}

impl RunReport {
    /// Step names in execution order (the base-ready marker included).
    pub fn names(&self) -> Vec<&str> {
        self.trace.iter().map(|entry| entry.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Sequences platform-initialization side effects with defined ordering and
/// idempotence guarantees. Constructed and driven by the host's entry point;
/// one per process launch.
pub struct StartupOrchestrator {
    state: State,
    pre_base: Vec<StartupTask>,
    post_base: Vec<StartupTask>,
    channel_ids: HashSet<ChannelId>,
    default_budget: Option<Duration>,
}

impl Default for StartupOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl StartupOrchestrator {
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            pre_base: Vec::new(),
            post_base: Vec::new(),
            channel_ids: HashSet::new(),
            default_budget: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Soft time budget applied to every task that carries none of its own.
    /// Overruns are logged, never aborted.
    pub fn set_default_budget(&mut self, budget: Duration) {
        self.default_budget = Some(budget);
    }

    pub fn default_budget(&self) -> Option<Duration> {
        self.default_budget
    }

    /// Register a task. No side effect until [`run`](Self::run).
    ///
    /// Fails with `DuplicateTask` if the name collides within the task's
    /// phase (the same name in the other phase is fine), and with
    /// `LateRegistration` once `run` has begun.
    pub fn register(&mut self, task: StartupTask) -> Result<(), OrchestratorError> {
        if self.state != State::Uninitialized {
            return Err(OrchestratorError::LateRegistration {
                name: task.name().clone(),
                state: self.state,
            });
        }

        let queue = match task.phase() {
            Phase::PreBase => &self.pre_base,
            Phase::PostBase => &self.post_base,
        };
        if queue.iter().any(|existing| existing.name() == task.name()) {
            return Err(OrchestratorError::DuplicateTask {
                name: task.name().clone(),
                phase: task.phase(),
            });
        }

        match task.phase() {
            Phase::PreBase => self.pre_base.push(task),
            Phase::PostBase => self.post_base.push(task),
        }
        Ok(())
    }

    /// Register an OS notification channel as a post-base task named
    /// `channel:<id>`.
    ///
    /// The task queries `service.supports_channels()` at run time; when the
    /// capability is absent it is a guaranteed no-op reported as success,
    /// never an error. Registering the same channel id twice is a silent
    /// no-op — the id is the de-duplication key.
    pub fn register_notification_channel(
        &mut self,
        spec: NotificationChannelSpec,
        service: Arc<dyn NotificationService>,
    ) -> Result<(), OrchestratorError> {
        let name = TaskName(format!("channel:{}", spec.id));
        if self.state != State::Uninitialized {
            return Err(OrchestratorError::LateRegistration { name, state: self.state });
        }
        if self.channel_ids.contains(&spec.id) {
            tracing::debug!(channel = %spec.id, "channel id already registered; skipping");
            return Ok(());
        }

        let id = spec.id.clone();
        self.register(StartupTask::new(name, Phase::PostBase, move || {
            if !service.supports_channels() {
                return Ok(TaskStatus::Skipped);
            }
            match service.create_channel(&spec) {
                Ok(()) => Ok(TaskStatus::Done),
                // Capability absent despite the probe; still a guaranteed
                // no-op, never surfaced.
                Err(PlatformError::Unsupported { .. }) => Ok(TaskStatus::Skipped),
                Err(other) => Err(other.into()),
            }
        }))?;
        // Record the id only once the task is actually in place, so a
        // rejected registration never blocks a later legitimate one.
        self.channel_ids.insert(id);
        Ok(())
    }

    /// Execute all pre-base tasks in registration order, invoke `base_ready`
    /// (the host bridge's own initialization), then all post-base tasks.
    ///
    /// Fatal task failures abort the remaining tasks of their phase and
    /// propagate as `TaskExecution`; non-fatal failures are logged and
    /// skipped, never reattempted. A second call fails with `AlreadyRan`.
    pub fn run(&mut self, base_ready: impl FnOnce()) -> Result<RunReport, OrchestratorError> {
        if self.state != State::Uninitialized {
            return Err(OrchestratorError::AlreadyRan);
        }

        let started_at = Utc::now();
        let started = Instant::now();
        let mut trace = Vec::new();

        self.state = State::Running(Phase::PreBase);
        let pre = std::mem::take(&mut self.pre_base);
        self.run_phase(Phase::PreBase, pre, &mut trace)?;

        let checkpoint = Instant::now();
        base_ready();
        trace.push(TraceEntry {
            name: BASE_READY.to_string(),
            phase: "checkpoint".to_string(),
            outcome: TraceOutcome::Executed,
            duration_ms: checkpoint.elapsed().as_millis(),
        });

        self.state = State::Running(Phase::PostBase);
        let post = std::mem::take(&mut self.post_base);
        self.run_phase(Phase::PostBase, post, &mut trace)?;

        self.state = State::Completed;
        tracing::info!(
            steps = trace.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "startup orchestration completed",
        );

        Ok(RunReport {
            started_at,
            trace,
            duration_ms: started.elapsed().as_millis(),
        })
    }

    fn run_phase(
        &mut self,
        phase: Phase,
        tasks: Vec<StartupTask>,
        trace: &mut Vec<TraceEntry>,
    ) -> Result<(), OrchestratorError> {
        for task in tasks {
            let name = task.name().clone();
            let policy = task.policy();
            let budget = task.time_budget().or(self.default_budget);

            let task_started = Instant::now();
            let result = task.execute();
            let elapsed = task_started.elapsed();

            if let Some(budget) = budget {
                if elapsed > budget {
                    tracing::warn!(
                        task = %name,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = budget.as_millis() as u64,
                        "startup task exceeded its time budget",
                    );
                }
            }

            let outcome = match result {
                Ok(TaskStatus::Done) => TraceOutcome::Executed,
                Ok(TaskStatus::Skipped) => TraceOutcome::Skipped,
                Err(source) => {
                    if policy == FailurePolicy::Fatal {
                        return Err(OrchestratorError::TaskExecution { name, source });
                    }
                    tracing::warn!(task = %name, error = %source, "non-fatal startup task failed; skipping");
                    TraceOutcome::Failed
                }
            };

            trace.push(TraceEntry {
                name: name.0,
                phase: phase.to_string(),
                outcome,
                duration_ms: elapsed.as_millis(),
            });
        }

        tracing::debug!(%phase, "startup phase complete");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests (service-level scenarios live in tests/orchestrator_tests.rs)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn marker_task(name: &str, phase: Phase, log: Rc<RefCell<Vec<String>>>) -> StartupTask {
        let label = name.to_string();
        StartupTask::new(name, phase, move || {
            log.borrow_mut().push(label);
            Ok(TaskStatus::Done)
        })
    }

    #[test]
    fn tasks_run_in_registration_order_around_the_checkpoint() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut orch = StartupOrchestrator::new();
        orch.register(marker_task("splash", Phase::PreBase, log.clone()))
            .expect("register splash");
        orch.register(marker_task("notif-channel", Phase::PostBase, log.clone()))
            .expect("register channel");

        let checkpoint = log.clone();
        let report = orch
            .run(move || checkpoint.borrow_mut().push(BASE_READY.to_string()))
            .expect("run");

        assert_eq!(*log.borrow(), vec!["splash", "base-ready", "notif-channel"]);
        assert_eq!(report.names(), vec!["splash", "base-ready", "notif-channel"]);
        assert_eq!(orch.state(), State::Completed);
    }

    #[test]
    fn duplicate_name_in_same_phase_is_rejected() {
        let mut orch = StartupOrchestrator::new();
        orch.register(StartupTask::new("splash", Phase::PreBase, || Ok(TaskStatus::Done)))
            .expect("first");
        let err = orch
            .register(StartupTask::new("splash", Phase::PreBase, || Ok(TaskStatus::Done)))
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::DuplicateTask { .. }), "got: {err}");
    }

    #[test]
    fn same_name_across_phases_is_allowed() {
        let mut orch = StartupOrchestrator::new();
        orch.register(StartupTask::new("telemetry", Phase::PreBase, || Ok(TaskStatus::Done)))
            .expect("pre");
        orch.register(StartupTask::new("telemetry", Phase::PostBase, || Ok(TaskStatus::Done)))
            .expect("post");
    }

    #[test]
    fn register_after_run_fails_late() {
        let mut orch = StartupOrchestrator::new();
        orch.run(|| {}).expect("run");
        let err = orch
            .register(StartupTask::new("late", Phase::PostBase, || Ok(TaskStatus::Done)))
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::LateRegistration { .. }), "got: {err}");
        assert!(err.to_string().contains("completed"));
    }

    struct NoChannels;

    impl crate::services::NotificationService for NoChannels {
        fn supports_channels(&self) -> bool {
            false
        }

        fn create_channel(&self, _spec: &NotificationChannelSpec) -> Result<(), PlatformError> {
            Err(PlatformError::Unsupported { feature: "notification channels" })
        }
    }

    fn channel_spec() -> NotificationChannelSpec {
        NotificationChannelSpec {
            id: "default".into(),
            display_name: "Default Notifications".to_string(),
            importance: crate::types::Importance::High,
            description: None,
        }
    }

    #[test]
    fn channel_registration_after_run_fails_late() {
        let mut orch = StartupOrchestrator::new();
        orch.run(|| {}).expect("run");
        let err = orch
            .register_notification_channel(channel_spec(), Arc::new(NoChannels))
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::LateRegistration { .. }), "got: {err}");
    }

    #[test]
    fn duplicate_channel_id_after_run_still_fails_late() {
        let mut orch = StartupOrchestrator::new();
        orch.register_notification_channel(channel_spec(), Arc::new(NoChannels))
            .expect("register before run");
        orch.run(|| {}).expect("run");

        // The id is already in the dedup set, but the state gate must win.
        let err = orch
            .register_notification_channel(channel_spec(), Arc::new(NoChannels))
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::LateRegistration { .. }), "got: {err}");
    }

    #[test]
    fn rejected_channel_registration_does_not_record_the_id() {
        let mut orch = StartupOrchestrator::new();
        orch.register(StartupTask::new("channel:default", Phase::PostBase, || {
            Ok(TaskStatus::Done)
        }))
        .expect("colliding task");

        let first = orch
            .register_notification_channel(channel_spec(), Arc::new(NoChannels))
            .unwrap_err();
        assert!(matches!(first, OrchestratorError::DuplicateTask { .. }), "got: {first}");

        // Were the id recorded on failure, the retry would silently no-op
        // instead of reporting the collision again.
        let second = orch
            .register_notification_channel(channel_spec(), Arc::new(NoChannels))
            .unwrap_err();
        assert!(matches!(second, OrchestratorError::DuplicateTask { .. }), "got: {second}");
    }

    #[test]
    fn default_budget_applies_without_aborting_overruns() {
        let mut orch = StartupOrchestrator::new();
        orch.set_default_budget(Duration::ZERO);
        assert_eq!(orch.default_budget(), Some(Duration::ZERO));

        orch.register(StartupTask::new("slow", Phase::PostBase, || Ok(TaskStatus::Done)))
            .expect("register");
        // Every task overruns a zero budget; the run must still complete.
        let report = orch.run(|| {}).expect("overrun is warn-only");
        assert_eq!(report.trace.last().expect("entry").outcome, TraceOutcome::Executed);
    }

    #[test]
    fn second_run_fails_with_already_ran() {
        let mut orch = StartupOrchestrator::new();
        orch.run(|| {}).expect("first run");
        let err = orch.run(|| {}).unwrap_err();
        assert!(matches!(err, OrchestratorError::AlreadyRan), "got: {err}");
    }

    #[test]
    fn fatal_failure_aborts_remaining_phase_tasks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut orch = StartupOrchestrator::new();
        orch.register(
            StartupTask::new("broken", Phase::PreBase, || {
                Err("bridge config unreadable".into())
            })
            .fatal(),
        )
        .expect("register broken");
        orch.register(marker_task("never", Phase::PreBase, log.clone()))
            .expect("register never");

        let err = orch.run(|| {}).unwrap_err();
        assert!(matches!(err, OrchestratorError::TaskExecution { .. }), "got: {err}");
        assert!(log.borrow().is_empty(), "tasks after a fatal failure must not run");
    }

    #[test]
    fn non_fatal_failure_is_skipped_and_run_completes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut orch = StartupOrchestrator::new();
        orch.register(StartupTask::new("flaky", Phase::PostBase, || {
            Err("channel store offline".into())
        }))
        .expect("register flaky");
        orch.register(marker_task("after", Phase::PostBase, log.clone()))
            .expect("register after");

        let report = orch.run(|| {}).expect("run completes");
        assert_eq!(*log.borrow(), vec!["after"]);
        let flaky = report.trace.iter().find(|e| e.name == "flaky").expect("traced");
        assert_eq!(flaky.outcome, TraceOutcome::Failed);
    }
}
