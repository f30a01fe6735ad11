//! Error definitions shared by handlers, the config proxy and the loader.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while declaring, loading, reading or writing fields.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bad handler parameters, unknown annotation kind or malformed declaration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value was rejected by a Min, Max or Range handler.
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Write to a locked field that already holds a value.
    #[error("{field} is locked - its value can't be changed")]
    DuplicateAssignment { field: String },

    /// The field was never declared on this config.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The field is declared but has no value yet.
    #[error("Field {0} has no value")]
    UnsetField(String),

    /// No source file matched a dotted module name.
    #[error("Module {module} not found (searched: {searched:?})")]
    ModuleNotFound {
        module: String,
        searched: Vec<PathBuf>,
    },

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in module {module}: {source}")]
    Parse {
        module: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Validation { .. } => "validation",
            Self::DuplicateAssignment { .. } => "duplicate_assignment",
            Self::UnknownField(_) => "unknown_field",
            Self::UnsetField(_) => "unset_field",
            Self::ModuleNotFound { .. } => "module_not_found",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
        }
    }

    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
