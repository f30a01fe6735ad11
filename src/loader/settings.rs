//! Loader settings.
//!
//! All fields have defaults so an empty settings file is valid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// How dotted module names are resolved to files.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderSettings {
    /// Directories searched, in order, for `import_module`.
    pub search_paths: Vec<PathBuf>,

    /// File extension of source modules (without the dot).
    pub extension: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from(".")],
            extension: "toml".to_string(),
        }
    }
}

impl LoaderSettings {
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            module: path.display().to_string(),
            source,
        })
    }
}
