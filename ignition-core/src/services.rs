//! Collaborator traits for the platform services the orchestrator drives
//! but does not implement.
//!
//! Implementations live at the host boundary (`ignition-platform` ships
//! recording/in-memory ones for simulation and tests).

use crate::error::PlatformError;
use crate::types::NotificationChannelSpec;

/// Splash/display service. Installation suspends first-frame rendering and
/// must happen before the bridge attaches its view hierarchy.
pub trait SplashHost {
    /// Install the splash screen. Assumed synchronous; assumed idempotent if
    /// called twice (defensive only — the orchestrator calls it once).
    fn install_splash_screen(&self) -> Result<(), PlatformError>;
}

/// OS notification service.
pub trait NotificationService {
    /// Whether the running platform supports notification channels.
    /// Queried before every `create_channel` call.
    fn supports_channels(&self) -> bool;

    /// Create (or re-assert) a notification channel. Idempotent per channel
    /// id by OS contract: creating an existing id is a no-op.
    fn create_channel(&self, spec: &NotificationChannelSpec) -> Result<(), PlatformError>;
}
