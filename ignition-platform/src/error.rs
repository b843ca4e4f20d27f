//! Error types for ignition-platform.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest loading, validation, and the
/// on-disk permission store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The startup manifest did not exist at the expected path.
    #[error("startup manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Two manifest channels share one id.
    #[error("duplicate notification channel id '{id}' in manifest")]
    DuplicateChannel { id: String },

    /// Two deep-link routes share one pattern.
    #[error("duplicate deep-link pattern '{pattern}'")]
    DuplicateRoute { pattern: String },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.ignition/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
