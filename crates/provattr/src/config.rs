//! # Configuration
//!
//! Settings for hosts of the accessor engine (the `provattr` CLI in
//! particular), derived with [`confique`].
//!
//! ## Resolution order
//!
//! 1. **Environment variables**: `PROVATTR_STORE_DIR`, `PROVATTR_DEFAULT_KIND`.
//! 2. **Config file**: `provattr.toml` in the OS config directory (via the
//!    `directories` crate), or an explicit path.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store_dir` | `<data dir>/store` | Root of the file-backed attribute store |
//! | `default_kind` | `server` | Entry kind used when none is given |

use crate::entry::EntryKind;
use crate::error::{ProvError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "provattr.toml";

/// Configuration for provattr, stored in `provattr.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProvattrConfig {
    /// Root directory of the file-backed store.
    #[config(env = "PROVATTR_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    /// Entry kind used when none is given (server, config, cos, domain, account).
    #[config(env = "PROVATTR_DEFAULT_KIND", default = "server")]
    pub default_kind: String,
}

impl Default for ProvattrConfig {
    fn default() -> Self {
        Self {
            store_dir: None,
            default_kind: "server".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "provattr")
}

/// Path of the config file in the OS config directory, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl ProvattrConfig {
    /// Load from the environment and the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from the environment and `path`. A missing file is not an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        builder.load().map_err(|e| ProvError::Config(e.to_string()))
    }

    /// The configured default entry kind.
    pub fn kind(&self) -> Result<EntryKind> {
        self.default_kind.parse().map_err(ProvError::Config)
    }

    /// The configured store directory, or `<data dir>/store`.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("store"))
            .ok_or_else(|| ProvError::Config("could not determine a data directory".to_string()))
    }
}
