//! Domain types for the Ignition startup orchestrator.
//!
//! All types that cross the manifest boundary are serializable via serde.
//! Platform-version knowledge never appears here; tasks are gated by
//! capability flags supplied at the edge (see `ignition-platform`).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a startup task, unique within its phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskName(pub String);

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TaskName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed notification channel identifier.
///
/// Stable across launches; used as the de-duplication key when registering
/// channels with the OS notification service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Startup phase a task belongs to, relative to the base-ready checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Runs before the host bridge initializes (e.g. splash installation,
    /// which must complete before the first frame is drawn).
    PreBase,
    /// Runs after the host bridge has attached its view hierarchy.
    PostBase,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::PreBase => write!(f, "pre-base"),
            Phase::PostBase => write!(f, "post-base"),
        }
    }
}

/// Whether a task failure aborts startup or is logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Failure aborts the remaining tasks of the phase and propagates.
    Fatal,
    /// Failure is logged and the task is skipped for this process lifetime.
    #[default]
    NonFatal,
}

/// Notification channel importance, mapped to the OS importance scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Default,
    High,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Low => write!(f, "low"),
            Importance::Default => write!(f, "default"),
            Importance::High => write!(f, "high"),
        }
    }
}

/// Orchestrator lifecycle state. No transition leaves `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Running(Phase),
    Completed,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Uninitialized => write!(f, "uninitialized"),
            State::Running(phase) => write!(f, "running({phase})"),
            State::Completed => write!(f, "completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Specification of an OS notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannelSpec {
    pub id: ChannelId,
    pub display_name: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(TaskName::from("splash").to_string(), "splash");
        assert_eq!(ChannelId::from("default").to_string(), "default");
    }

    #[test]
    fn newtype_equality() {
        let a = ChannelId::from("x");
        let b = ChannelId::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::PreBase.to_string(), "pre-base");
        assert_eq!(Phase::PostBase.to_string(), "post-base");
    }

    #[test]
    fn state_never_equates_across_phases() {
        assert_ne!(State::Running(Phase::PreBase), State::Running(Phase::PostBase));
        assert_ne!(State::Completed, State::Uninitialized);
    }

    #[test]
    fn failure_policy_defaults_to_non_fatal() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::NonFatal);
    }
}
