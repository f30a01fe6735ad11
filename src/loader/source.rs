//! Source module parsing.
//!
//! A source module is a TOML document. A top-level table with an
//! `annotation` key declares a managed field; every other entry is a plain
//! attribute and is left alone.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;

/// A managed field declaration, before its annotation is resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(skip)]
    pub name: String,

    /// Annotation expression, e.g. `"Range[1, 5]"`.
    pub annotation: String,

    /// Initial value; omitted means declared but unset.
    #[serde(default)]
    pub value: Option<Value>,
}

/// Parsed contents of one source module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleSource {
    pub name: String,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Top-level names that carry no annotation.
    pub ignored: Vec<String>,
}

/// Parse module text.
pub fn parse_module(module: &str, text: &str) -> ConfigResult<ModuleSource> {
    let parse_err = |source| ConfigError::Parse {
        module: module.to_string(),
        source,
    };

    let table: toml::Table = toml::from_str(text).map_err(parse_err)?;
    let mut parsed = ModuleSource {
        name: module.to_string(),
        ..ModuleSource::default()
    };

    for (name, entry) in table {
        let is_declaration = matches!(&entry, toml::Value::Table(t) if t.contains_key("annotation"));
        if !is_declaration {
            tracing::debug!(module, attribute = %name, "Attribute has no annotation, ignoring");
            parsed.ignored.push(name);
            continue;
        }

        let mut declaration: Declaration = entry.try_into().map_err(parse_err)?;
        declaration.name = name;
        parsed.declarations.push(declaration);
    }

    Ok(parsed)
}

/// Read and parse a module file.
pub fn read_module(module: &str, path: &Path) -> ConfigResult<ModuleSource> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_module(module, &content)
}
