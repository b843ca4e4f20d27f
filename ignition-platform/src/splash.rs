//! Splash-screen startup task.
//!
//! Installation must happen before the bridge attaches its view hierarchy,
//! so this is always a pre-base task. A failed install is cosmetic (the app
//! flashes a blank frame instead of the splash) and therefore non-fatal.

use std::sync::Arc;

use ignition_core::{Phase, SplashHost, StartupTask, TaskStatus};

use crate::manifest::SplashConfig;

/// Task name used in the execution trace.
pub const SPLASH_TASK: &str = "splash";

/// Build the pre-base task that installs the splash screen.
pub fn splash_task(config: SplashConfig, host: Arc<dyn SplashHost>) -> StartupTask {
    StartupTask::new(SPLASH_TASK, Phase::PreBase, move || {
        tracing::debug!(
            show_duration_ms = config.launch_show_duration_ms,
            auto_hide = config.launch_auto_hide,
            background = %config.background_color,
            "installing splash screen",
        );
        host.install_splash_screen()?;
        Ok(TaskStatus::Done)
    })
}
