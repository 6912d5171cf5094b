//! User configuration and preferences

use crate::error::{CtxpickError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    /// Token encoding used when `--encoding` is not given
    pub encoding: Option<String>,
    /// Write to stdout instead of the clipboard by default
    pub stdout: bool,
}

impl UserConfig {
    /// Get the config file path (~/.config/ctxpick/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ctxpick").join("config.json"))
    }

    /// Load config from the default location, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            CtxpickError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            CtxpickError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
