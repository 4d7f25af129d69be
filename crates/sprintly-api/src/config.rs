//! User configuration under `~/.sprintly/`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, Result};

/// Config format version; a mismatch sends the user back through setup.
pub const CONFIG_VERSION: &str = "2.1";

const SPRINTLY_DIR: &str = ".sprintly";
const CONFIG_FILE: &str = "config.yml";
const CACHE_FILE: &str = "cache.json";
const HOOK_FILE: &str = "commit-msg";

/// The product the user selected as their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChoice {
    pub id: u64,
    pub name: String,
}

/// Stored credentials and default product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Format version this file was written with.
    pub version: String,
    /// Sprint.ly username (email).
    pub user: String,
    /// Sprint.ly API key.
    pub key: String,
    /// Numeric user id, resolved via `whoami` at setup time.
    pub id: u64,
    pub product: ProductChoice,
}

impl UserConfig {
    /// Whether this config was written by a compatible version of the tool.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version == CONFIG_VERSION
    }
}

/// Paths and file operations rooted at the per-user sprintly directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Open the store at `~/.sprintly`, creating the directory on demand.
    ///
    /// # Errors
    /// Returns an error when the home directory cannot be resolved or the
    /// directory cannot be created.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ApiError::NoHomeDir)?;
        Self::open(home.join(SPRINTLY_DIR))
    }

    /// Open a store rooted at an explicit directory.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            fs::create_dir_all(&root)?;
            debug!(path = %root.display(), "created sprintly directory");
        }
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.root.join(CACHE_FILE)
    }

    /// Path of the commit-msg shim that `hook install` symlinks into
    /// repositories.
    #[must_use]
    pub fn hook_path(&self) -> PathBuf {
        self.root.join(HOOK_FILE)
    }

    /// Load the stored config, or `None` when none has been written yet.
    ///
    /// # Errors
    /// Returns an error when an existing file cannot be read or parsed.
    pub fn load_config(&self) -> Result<Option<UserConfig>> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let config = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Persist the config.
    ///
    /// # Errors
    /// Returns an error when serialization or the write fails.
    pub fn store_config(&self, config: &UserConfig) -> Result<()> {
        let content = serde_yaml::to_string(config)?;
        fs::write(self.config_path(), content)?;
        Ok(())
    }
}
