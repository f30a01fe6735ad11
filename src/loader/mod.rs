//! Module loading.
//!
//! # Data Flow
//! ```text
//! dotted name ("tests.config")
//!     → resolve.rs (search paths → tests/config.toml)
//!     → source.rs (parse TOML, split declarations from plain attributes)
//!     → registry (annotation → configured handler chain)
//!     → Config::stage (install each declaration, nothing committed yet)
//!     → Config::commit (all fields land together)
//! ```
//!
//! # Design Decisions
//! - A failing load installs nothing from that module
//! - Install is not a write: Lock never rejects it
//! - A reload re-declares the layout; Lock fields keep the value they hold,
//!   other fields take the value from the source
//! - Unregistered annotations fail the load rather than leave a field unguarded

use std::path::Path;

use crate::error::ConfigResult;
use crate::proxy::Config;

pub mod resolve;
pub mod settings;
pub mod source;

pub use settings::LoaderSettings;
pub use source::{Declaration, ModuleSource};

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub module: String,
    /// Fields installed, in source order.
    pub installed: Vec<String>,
    /// Top-level attributes without an annotation.
    pub ignored: Vec<String>,
}

impl Config {
    /// Load a module by dotted name, resolved through the search paths.
    pub fn import_module(&mut self, module: &str) -> ConfigResult<LoadReport> {
        let path = resolve::resolve_module(module, self.settings())?;
        tracing::debug!(module, path = ?path, "Module resolved");
        let parsed = source::read_module(module, &path)?;
        self.apply(parsed)
    }

    /// Load a module from an explicit file path.
    ///
    /// The module is named after the file stem.
    pub fn load_by_path(&mut self, path: impl AsRef<Path>) -> ConfigResult<LoadReport> {
        let path = path.as_ref();
        let module = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let parsed = source::read_module(&module, path)?;
        self.apply(parsed)
    }

    /// Load a module from source text.
    pub fn load_str(&mut self, module: &str, text: &str) -> ConfigResult<LoadReport> {
        let parsed = source::parse_module(module, text)?;
        self.apply(parsed)
    }

    fn apply(&mut self, parsed: ModuleSource) -> ConfigResult<LoadReport> {
        let ModuleSource {
            name: module,
            declarations,
            ignored,
        } = parsed;

        let staged = declarations
            .into_iter()
            .map(|decl| {
                let handlers = self.registry().resolve_annotation(&decl.annotation)?;
                self.stage(decl.name, handlers, decl.value, Some(module.as_str()))
            })
            .collect::<ConfigResult<Vec<_>>>()
            .inspect_err(|e| {
                tracing::warn!(module = %module, kind = e.kind(), error = %e, "Module load failed");
            })?;

        let installed: Vec<String> = staged.iter().map(|f| f.name().to_string()).collect();
        self.commit(staged);

        tracing::info!(
            module = %module,
            installed = installed.len(),
            ignored = ignored.len(),
            "Config module loaded"
        );

        Ok(LoadReport {
            module,
            installed,
            ignored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::handlers::{Lock, Max, Min};
    use crate::value::Value;

    #[test]
    fn test_load_str_installs_annotated_fields() {
        let mut config = Config::with_builtin_handlers();
        let report = config
            .load_str(
                "config",
                r#"
NAME = "plain"
PRIVATE_INT_FIELD = { annotation = "Lock", value = 123 }
PUBLIC_RANGE_FIELD = { annotation = "Range[1, 5]", value = 4 }
"#,
            )
            .unwrap();

        assert_eq!(report.installed, ["PRIVATE_INT_FIELD", "PUBLIC_RANGE_FIELD"]);
        assert_eq!(report.ignored, ["NAME"]);
        assert!(!config.contains("NAME"));
        assert_eq!(
            config.field("PUBLIC_RANGE_FIELD").unwrap().module(),
            Some("config")
        );
    }

    #[test]
    fn test_unregistered_handler_aborts_whole_module() {
        let mut config = Config::new();
        config.add_handler::<Lock>().add_handler::<Min>().add_handler::<Max>();

        let err = config
            .load_str(
                "config",
                r#"
A = { annotation = "Lock", value = 1 }
B = { annotation = "Range[1, 5]", value = 4 }
"#,
            )
            .unwrap_err();

        assert!(matches!(err, ConfigError::Configuration(ref msg) if msg.contains("Range")));
        assert!(config.is_empty());
    }

    #[test]
    fn test_invalid_initial_value_aborts_whole_module() {
        let mut config = Config::with_builtin_handlers();
        let err = config
            .load_str(
                "config",
                r#"
A = { annotation = "Min[1]", value = [1] }
B = { annotation = "Max[1]", value = [1, 2] }
"#,
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "B"));
        assert!(!config.contains("A"));
    }

    #[test]
    fn test_reload_redeclares_locked_module() {
        let source = r#"
FREE = { annotation = "Max[3]", value = [1] }
LOCKED = { annotation = "Lock", value = "v1" }
"#;
        let mut config = Config::with_builtin_handlers();
        config.load_str("config", source).unwrap();
        config.set("FREE", vec![1, 2]).unwrap();

        let report = config
            .load_str("config", &source.replace("\"v1\"", "\"v2\""))
            .unwrap();
        assert_eq!(report.installed, ["FREE", "LOCKED"]);
        assert_eq!(config.get("FREE").unwrap(), &Value::from(vec![1]));
        assert_eq!(config.get("LOCKED").unwrap().as_str(), Some("v1"));
        assert!(matches!(
            config.set("LOCKED", "v3"),
            Err(ConfigError::DuplicateAssignment { .. })
        ));
    }

    #[test]
    fn test_redeclare_without_value_revalidates_stored() {
        let mut config = Config::with_builtin_handlers();
        config
            .load_str("a", r#"NAME = { annotation = "Max[10]", value = "abcdefgh" }"#)
            .unwrap();

        let err = config
            .load_str("b", r#"NAME = { annotation = "Max[3]" }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "NAME"));
        assert_eq!(config.handler_names("NAME").unwrap(), ["Max"]);
        assert_eq!(config.field("NAME").unwrap().module(), Some("a"));
        assert_eq!(config.get("NAME").unwrap().as_str(), Some("abcdefgh"));

        config
            .load_str("c", r#"NAME = { annotation = "Min[2]" }"#)
            .unwrap();
        assert_eq!(config.get("NAME").unwrap().as_str(), Some("abcdefgh"));
    }

    #[test]
    fn test_reload_without_lock_redeclares_fields() {
        let source = r#"F = { annotation = "Min[1]", value = "abc" }"#;
        let mut config = Config::with_builtin_handlers();
        config.load_str("config", source).unwrap();
        config.set("F", "z").unwrap();

        let report = config.load_str("config", source).unwrap();
        assert_eq!(report.installed, ["F"]);
        assert_eq!(config.get("F").unwrap().as_str(), Some("abc"));
        assert_eq!(config.len(), 1);
    }
}
