//! Notification-channel wiring.
//!
//! Every application gets the `default` channel; the manifest may declare
//! more. Channel tasks are post-base by convention and guarded by the
//! platform's channel capability inside the orchestrator.

use std::sync::Arc;

use ignition_core::{
    Importance, NotificationChannelSpec, NotificationService, OrchestratorError,
    StartupOrchestrator,
};

use crate::manifest::StartupManifest;

/// The default channel id every launch registers.
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// The channel every application registers regardless of its manifest.
pub fn default_channel(app_name: &str) -> NotificationChannelSpec {
    NotificationChannelSpec {
        id: DEFAULT_CHANNEL_ID.into(),
        display_name: "Default Notifications".to_string(),
        importance: Importance::High,
        description: Some(format!("{app_name} notifications")),
    }
}

/// Register the default channel plus every manifest channel.
///
/// A manifest channel reusing the `default` id silently wins nothing: the
/// orchestrator de-duplicates on id and keeps the first registration.
pub fn register_manifest_channels(
    orchestrator: &mut StartupOrchestrator,
    manifest: &StartupManifest,
    service: Arc<dyn NotificationService>,
) -> Result<(), OrchestratorError> {
    orchestrator.register_notification_channel(default_channel(&manifest.app_name), service.clone())?;
    for spec in &manifest.channels {
        orchestrator.register_notification_channel(spec.clone(), service.clone())?;
    }
    Ok(())
}
