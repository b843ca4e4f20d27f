//! Platform layer for Ignition.
//!
//! Everything that knows about the host platform lives here: capability
//! flags derived from an API level, the YAML startup manifest, the built-in
//! task constructors (splash, notification channels, permission bootstrap,
//! deep links), and in-memory service implementations used for simulation
//! and tests.
//!
//! - [`capabilities`] — version-gated feature flags; the only place API
//!   levels are interpreted
//! - [`manifest`] — [`StartupManifest`] loading and validation
//! - [`services`] — recording [`SplashHost`]/[`NotificationService`] impls
//! - [`splash`], [`channels`], [`deeplink`], [`permissions`] — task builders
//!
//! [`SplashHost`]: ignition_core::SplashHost
//! [`NotificationService`]: ignition_core::NotificationService

pub mod capabilities;
pub mod channels;
pub mod deeplink;
pub mod error;
pub mod manifest;
pub mod permissions;
pub mod services;
pub mod splash;

pub use capabilities::{ApiLevel, Capabilities};
pub use error::ConfigError;
pub use manifest::{SplashConfig, StartupManifest};
