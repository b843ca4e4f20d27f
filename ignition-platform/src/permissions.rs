//! On-disk permission store and first-launch bootstrap task.
//!
//! # Storage layout
//!
//! ```text
//! ~/.ignition/
//!   permissions.yaml   (mode 0600, created on first launch)
//! ```
//!
//! # API pattern
//!
//! Every function touching the store has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ignition_core::{Phase, StartupTask, TaskStatus};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Runtime permissions the shell asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Notifications,
    Camera,
    Storage,
}

/// Status of a single permission, as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Prompt,
    #[default]
    NotAsked,
}

/// Persisted permission state across launches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionStore {
    #[serde(default)]
    pub notifications: PermissionStatus,
    #[serde(default)]
    pub camera: PermissionStatus,
    #[serde(default)]
    pub storage: PermissionStatus,
    /// True once the host has walked the user through the first-launch
    /// permission dialog.
    #[serde(default)]
    pub first_time_setup: bool,
}

impl PermissionStore {
    pub fn status(&self, kind: PermissionKind) -> PermissionStatus {
        match kind {
            PermissionKind::Notifications => self.notifications,
            PermissionKind::Camera => self.camera,
            PermissionKind::Storage => self.storage,
        }
    }

    pub fn set_status(&mut self, kind: PermissionKind, status: PermissionStatus) {
        match kind {
            PermissionKind::Notifications => self.notifications = status,
            PermissionKind::Camera => self.camera = status,
            PermissionKind::Storage => self.storage = status,
        }
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.ignition/permissions.yaml` — pure, no I/O.
pub fn store_path_at(home: &Path) -> PathBuf {
    home.join(".ignition").join("permissions.yaml")
}

fn state_dir_at(home: &Path) -> Result<PathBuf, ConfigError> {
    let dir = home.join(".ignition");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load the permission store, or the all-`NotAsked` default when the file
/// does not exist yet.
pub fn load_at(home: &Path) -> Result<PermissionStore, ConfigError> {
    let path = store_path_at(home);
    if !path.exists() {
        return Ok(PermissionStore::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<PermissionStore, ConfigError> {
    load_at(&home()?)
}

/// Atomically save the permission store.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, store: &PermissionStore) -> Result<(), ConfigError> {
    state_dir_at(home)?;
    let path = store_path_at(home);
    let tmp_path = path.with_file_name("permissions.yaml.tmp");

    let yaml = serde_yaml::to_string(store)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_at` convenience wrapper.
pub fn save(store: &PermissionStore) -> Result<(), ConfigError> {
    save_at(&home()?, store)
}

/// Record that the host finished the first-launch permission dialog.
pub fn complete_first_time_setup_at(home: &Path) -> Result<PermissionStore, ConfigError> {
    let mut store = load_at(home)?;
    store.first_time_setup = true;
    save_at(home, &store)?;
    Ok(store)
}

// ---------------------------------------------------------------------------
// Bootstrap task
// ---------------------------------------------------------------------------

/// Build the post-base task that seeds the permission store on first launch.
///
/// First launch: persists the all-`NotAsked` default so the host's
/// permission dialog has a store to update. Later launches: nothing to do,
/// reported as skipped. Non-fatal — a missing store only delays the dialog.
pub fn bootstrap_task(home: impl Into<PathBuf>) -> StartupTask {
    let home: PathBuf = home.into();
    StartupTask::new("permissions", Phase::PostBase, move || {
        if store_path_at(&home).exists() {
            return Ok(TaskStatus::Skipped);
        }
        let store = PermissionStore::default();
        save_at(&home, &store)?;
        tracing::info!("first launch: permission store seeded, setup pending");
        Ok(TaskStatus::Done)
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
