use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Data root used when nothing else is configured.
pub const DEFAULT_ROOT: &str = "src/data/raw";

/// Environment variable overriding the data root.
pub const ROOT_ENV_VAR: &str = "MH_DATA_ROOT";

/// Where the dataset loader looks for its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory containing the two group subdirectories.
    pub root: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

impl LoaderConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Take the root from `MH_DATA_ROOT`, falling back to [`DEFAULT_ROOT`].
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(ROOT_ENV_VAR))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    /// Read a JSON config file such as `{"root": "/data/raw"}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
