//! Startup manifest.
//!
//! The manifest is the host application's declarative startup description:
//! splash behavior, notification channels, deep-link routes, and an optional
//! whole-startup time budget. Loaded once per launch from YAML.
//!
//! ```yaml
//! app_id: com.example.shell
//! app_name: Example Shell
//! splash:
//!   launch_show_duration_ms: 30000
//!   launch_auto_hide: false
//!   background_color: "#8026d9"
//! channels:
//!   - id: default
//!     display_name: Default Notifications
//!     importance: high
//! deep_links:
//!   - pattern: /tools
//!     target: /tools
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ignition_core::types::NotificationChannelSpec;

use crate::deeplink::DeepLinkRoute;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Splash-screen behavior, mirrored from the host bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Safety-net duration; the application hides the splash manually once
    /// its first page is interactive.
    pub launch_show_duration_ms: u64,
    /// When false the native splash stays up until the page asks to hide it,
    /// avoiding a blank frame between splash and first render.
    pub launch_auto_hide: bool,
    pub background_color: String,
    pub show_spinner: bool,
    pub full_screen: bool,
    pub immersive: bool,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            launch_show_duration_ms: 30_000,
            launch_auto_hide: false,
            background_color: "#000000".to_string(),
            show_spinner: false,
            full_screen: true,
            immersive: true,
        }
    }
}

/// Root of the startup manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupManifest {
    pub app_id: String,
    pub app_name: String,
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub channels: Vec<NotificationChannelSpec>,
    #[serde(default)]
    pub deep_links: Vec<DeepLinkRoute>,
    /// Soft time budget applied to every startup task that carries none of
    /// its own. Overruns are logged, never aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_budget_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load and validate a startup manifest.
///
/// Returns `ConfigError::ManifestNotFound` if absent and
/// `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_manifest(path: &Path) -> Result<StartupManifest, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ManifestNotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let manifest: StartupManifest = serde_yaml::from_str(&contents)
        .map_err(|e| ConfigError::Parse { path: path.to_path_buf(), source: e })?;
    manifest.validate()?;
    Ok(manifest)
}

impl StartupManifest {
    /// Reject duplicate channel ids and duplicate deep-link patterns.
    /// Both are stable keys; a collision is a manifest-authoring error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut channel_ids = HashSet::new();
        for channel in &self.channels {
            if !channel_ids.insert(channel.id.0.as_str()) {
                return Err(ConfigError::DuplicateChannel { id: channel.id.0.clone() });
            }
        }

        let mut patterns = HashSet::new();
        for route in &self.deep_links {
            if !patterns.insert(route.pattern.as_str()) {
                return Err(ConfigError::DuplicateRoute { pattern: route.pattern.clone() });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
