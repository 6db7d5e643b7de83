//! Persisted indexer settings.
//!
//! Settings live in a TOML file (by default `.dirindex.toml` at the watched
//! root) and are layered: defaults, then the file, then command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::paths::SEPARATOR;

/// Prefix used when none is configured.
pub const DEFAULT_INDEX_PREFIX: &str = "_Index_of_";

/// Extension of every generated index file.
pub const INDEX_EXTENSION: &str = ".md";

/// Config file name looked up at the watched root.
pub const CONFIG_FILE_NAME: &str = ".dirindex.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix of every index file name.
    pub index_prefix: String,
    /// Raw folder inclusion list, comma or newline separated. Empty means all folders.
    pub folders_included: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_prefix: DEFAULT_INDEX_PREFIX.to_string(),
            folders_included: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is absent.
    /// Values are not validated here; callers validate after applying overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_prefix.is_empty() {
            return Err(ConfigError::Invalid("index prefix must not be empty".into()));
        }
        if self.index_prefix.contains(SEPARATOR) {
            return Err(ConfigError::Invalid(format!(
                "index prefix must not contain '{SEPARATOR}': {}",
                self.index_prefix
            )));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, prefix: Option<&str>, include: &[String]) -> Self {
        if let Some(prefix) = prefix {
            self.index_prefix = prefix.to_string();
        }
        if !include.is_empty() {
            let mut entries: Vec<&str> = Vec::new();
            let existing = self.folders_included.trim();
            if !existing.is_empty() {
                entries.push(existing);
            }
            entries.extend(include.iter().map(String::as_str));
            self.folders_included = entries.join("\n");
        }
        self
    }

    /// File name of the index owned by a directory called `owner_name`.
    pub fn index_file_name(&self, owner_name: &str) -> String {
        format!("{}{}{}", self.index_prefix, owner_name, INDEX_EXTENSION)
    }

    /// Whether a file name follows the index naming scheme.
    pub fn is_index_name(&self, name: &str) -> bool {
        name.starts_with(self.index_prefix.as_str()) && name.ends_with(INDEX_EXTENSION)
    }
}

/// Config file location for a watched root when none is given explicitly.
pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}
