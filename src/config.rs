//! # Configuration
//!
//! Propertyhub configuration is managed by [`confique`], loaded in priority
//! order:
//!
//! 1. **Environment variables**: `PROPERTYHUB_DATA_DIR`,
//!    `PROPERTYHUB_REMOTE_URL`, `PROPERTYHUB_PAGE_SIZE`.
//! 2. **Config file**: `propertyhub.toml` in the data directory.
//! 3. **Compiled defaults** via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the snapshot and favorites slots live |
//! | `remote_url` | _(unset)_ | Base URL of the remote record API; unset means offline-only |
//! | `page_size` | `12` | Initial size and growth step of the result window |

use std::path::PathBuf;

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SNAPSHOT_FILE: &str = "properties.json";
pub const FAVORITES_FILE: &str = "favorites.json";
const CONFIG_FILE: &str = "propertyhub.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HubConfig {
    /// Directory holding the offline snapshot and favorites slots.
    /// Defaults to the OS-appropriate data directory.
    #[config(env = "PROPERTYHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the remote record API. When unset, the store runs on
    /// local sources only.
    #[config(env = "PROPERTYHUB_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// Initial size and growth step of the "load more" window.
    #[config(env = "PROPERTYHUB_PAGE_SIZE", default = 12)]
    pub page_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            remote_url: None,
            page_size: 12,
        }
    }
}

impl HubConfig {
    /// Layered load: env over file over defaults. A missing config file is
    /// fine; a malformed one is not.
    pub fn load() -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = os_data_dir() {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        builder
            .load()
            .map_err(|e| Error::Store(format!("failed to load configuration: {}", e)))
    }

    /// The resolved data directory: explicit setting, else the OS data dir.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        os_data_dir().ok_or_else(|| Error::Store("no data directory available".to_string()))
    }

    pub fn snapshot_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(SNAPSHOT_FILE))
    }

    pub fn favorites_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(FAVORITES_FILE))
    }
}

fn os_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "propertyhub").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.page_size, 12);
        assert!(config.remote_url.is_none());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = HubConfig {
            data_dir: Some(PathBuf::from("/tmp/hub")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/hub"));
        assert_eq!(
            config.snapshot_path().unwrap(),
            PathBuf::from("/tmp/hub/properties.json")
        );
        assert_eq!(
            config.favorites_path().unwrap(),
            PathBuf::from("/tmp/hub/favorites.json")
        );
    }
}
