//! Platform capability flags.
//!
//! OS-version branching is isolated here: the host supplies its API level
//! once at launch, and every version-gated startup task consumes a boolean
//! capability flag instead of testing the version inline.

use std::fmt;

use serde::Serialize;

/// Minimum API level with notification-channel support (Android 8.0).
pub const CHANNELS_MIN_API: u32 = 26;

/// Minimum API level with the themed system splash screen (Android 12).
/// Below this the compat splash host is still installable.
pub const THEMED_SPLASH_MIN_API: u32 = 31;

/// A platform API level as reported by the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ApiLevel(pub u32);

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

/// Capability flags supplied to the orchestrator at process entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub api_level: ApiLevel,
    pub supports_channels: bool,
    pub supports_themed_splash: bool,
}

impl Capabilities {
    /// Derive capability flags from a raw API level.
    pub fn from_api_level(api_level: impl Into<ApiLevel>) -> Self {
        let api_level = api_level.into();
        Self {
            api_level,
            supports_channels: api_level.0 >= CHANNELS_MIN_API,
            supports_themed_splash: api_level.0 >= THEMED_SPLASH_MIN_API,
        }
    }
}
