//! Deep-link routing for notification payloads.
//!
//! Notification payloads navigate the app on tap. Resolution precedence:
//! an explicit `route` key wins, then a `toolId` maps into the tool page,
//! and anything else lands in the notification inbox.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use ignition_core::{Phase, StartupTask, TaskStatus};

use crate::error::ConfigError;

/// Payload key carrying an explicit in-app route.
pub const ROUTE_KEY: &str = "route";
/// Payload key carrying a tool identifier.
pub const TOOL_KEY: &str = "toolId";
/// Fallback target when a payload names no destination.
pub const INBOX_TARGET: &str = "/notifications";

/// A registered deep-link route: payload pattern to in-app target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLinkRoute {
    pub pattern: String,
    pub target: String,
}

/// Pattern-to-target table built during startup, queried for the lifetime
/// of the process.
#[derive(Debug, Default)]
pub struct DeepLinkRegistry {
    routes: Vec<DeepLinkRoute>,
}

impl DeepLinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Duplicate patterns are rejected: the table must be
    /// unambiguous for the whole process lifetime.
    pub fn register(&mut self, route: DeepLinkRoute) -> Result<(), ConfigError> {
        if self.routes.iter().any(|existing| existing.pattern == route.pattern) {
            return Err(ConfigError::DuplicateRoute { pattern: route.pattern });
        }
        self.routes.push(route);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn target_for(&self, pattern: &str) -> Option<&str> {
        self.routes
            .iter()
            .find(|route| route.pattern == pattern)
            .map(|route| route.target.as_str())
    }

    /// Resolve a notification payload to an in-app target.
    ///
    /// An explicit `route` resolves through the table when registered and is
    /// passed through verbatim otherwise; `toolId` maps to `/tool/<id>`;
    /// everything else falls back to the inbox.
    pub fn resolve(&self, payload: &HashMap<String, String>) -> String {
        if let Some(route) = payload.get(ROUTE_KEY) {
            return self
                .target_for(route)
                .map(str::to_owned)
                .unwrap_or_else(|| route.clone());
        }
        if let Some(tool_id) = payload.get(TOOL_KEY) {
            return format!("/tool/{tool_id}");
        }
        INBOX_TARGET.to_string()
    }
}

/// Build the post-base task that loads the manifest's routes into a shared
/// registry. Non-fatal: a broken route table degrades taps to the inbox.
pub fn deeplink_task(
    registry: Arc<Mutex<DeepLinkRegistry>>,
    routes: Vec<DeepLinkRoute>,
) -> StartupTask {
    StartupTask::new("deep-links", Phase::PostBase, move || {
        if routes.is_empty() {
            return Ok(TaskStatus::Skipped);
        }
        let mut registry = registry
            .lock()
            .map_err(|_| "deep-link registry lock poisoned")?;
        let count = routes.len();
        for route in routes {
            registry.register(route)?;
        }
        tracing::debug!(routes = count, "deep-link routes registered");
        Ok(TaskStatus::Done)
    })
}
