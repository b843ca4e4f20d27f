//! Ignition core library — startup task model, orchestrator, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`OrchestratorError`], [`PlatformError`]
//! - [`task`] — [`StartupTask`] and its builder
//! - [`services`] — collaborator traits ([`SplashHost`], [`NotificationService`])
//! - [`orchestrator`] — [`StartupOrchestrator`]

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod task;
pub mod types;

pub use error::{OrchestratorError, PlatformError, TaskError};
pub use orchestrator::{RunReport, StartupOrchestrator, TraceEntry, TraceOutcome, BASE_READY};
pub use services::{NotificationService, SplashHost};
pub use task::{StartupTask, TaskStatus};
pub use types::{
    ChannelId, FailurePolicy, Importance, NotificationChannelSpec, Phase, State, TaskName,
};
