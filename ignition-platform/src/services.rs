//! In-memory service implementations.
//!
//! The real splash host and notification manager live inside the host
//! runtime; these recording doubles back the CLI simulator and tests.

use std::sync::Mutex;

use ignition_core::{NotificationChannelSpec, NotificationService, PlatformError, SplashHost};

use crate::capabilities::Capabilities;

// ---------------------------------------------------------------------------
// Splash
// ---------------------------------------------------------------------------

/// Counts splash installations. Idempotent: repeat installs are recorded but
/// never fail, matching the defensive contract of the real host.
#[derive(Debug, Default)]
pub struct RecordingSplashHost {
    installs: Mutex<u32>,
}

impl RecordingSplashHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_count(&self) -> u32 {
        *self.installs.lock().expect("splash lock")
    }
}

impl SplashHost for RecordingSplashHost {
    fn install_splash_screen(&self) -> Result<(), PlatformError> {
        *self.installs.lock().expect("splash lock") += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Records every accepted channel, idempotent per id like the OS manager.
#[derive(Debug)]
pub struct RecordingNotificationService {
    supports_channels: bool,
    channels: Mutex<Vec<NotificationChannelSpec>>,
}

impl RecordingNotificationService {
    pub fn new(capabilities: &Capabilities) -> Self {
        Self {
            supports_channels: capabilities.supports_channels,
            channels: Mutex::new(Vec::new()),
        }
    }

    /// Channels created so far, in creation order, deduplicated by id.
    pub fn channels(&self) -> Vec<NotificationChannelSpec> {
        self.channels.lock().expect("channels lock").clone()
    }
}

impl NotificationService for RecordingNotificationService {
    fn supports_channels(&self) -> bool {
        self.supports_channels
    }

    fn create_channel(&self, spec: &NotificationChannelSpec) -> Result<(), PlatformError> {
        if !self.supports_channels {
            return Err(PlatformError::Unsupported { feature: "notification channels" });
        }
        let mut channels = self.channels.lock().expect("channels lock");
        if channels.iter().any(|existing| existing.id == spec.id) {
            // OS contract: re-creating an existing id is a no-op.
            return Ok(());
        }
        channels.push(spec.clone());
        Ok(())
    }
}

/// A notification service for platforms without channel support.
#[derive(Debug, Default)]
pub struct NullNotificationService;

impl NotificationService for NullNotificationService {
    fn supports_channels(&self) -> bool {
        false
    }

    fn create_channel(&self, _spec: &NotificationChannelSpec) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported { feature: "notification channels" })
    }
}
