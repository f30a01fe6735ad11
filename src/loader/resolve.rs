//! Dotted module name resolution.

use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::LoaderSettings;

/// Candidate files for `a.b.c`: `<search_path>/a/b/c.<ext>` for each search path.
pub fn candidates(module: &str, settings: &LoaderSettings) -> ConfigResult<Vec<PathBuf>> {
    let segments: Vec<&str> = module.split('.').collect();
    let valid = segments.iter().all(|s| {
        !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    });
    if !valid {
        return Err(ConfigError::Configuration(format!(
            "invalid module name {:?}",
            module
        )));
    }

    let relative: PathBuf = segments.iter().collect();
    Ok(settings
        .search_paths
        .iter()
        .map(|root| root.join(&relative).with_extension(&settings.extension))
        .collect())
}

/// First existing candidate for `module`.
pub fn resolve_module(module: &str, settings: &LoaderSettings) -> ConfigResult<PathBuf> {
    let searched = candidates(module, settings)?;
    match searched.iter().find(|path| path.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(ConfigError::ModuleNotFound {
            module: module.to_string(),
            searched,
        }),
    }
}
