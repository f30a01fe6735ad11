//! Shared helpers for integration tests.

use std::path::PathBuf;

use confstar::{handlers, Config, LoaderSettings};

/// Directory holding the fixture modules.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Config with every built-in handler, searching the fixtures directory.
pub fn fixture_config() -> Config {
    let _ = confstar::observability::init_logging();

    let mut config = Config::new().with_settings(LoaderSettings {
        search_paths: vec![fixtures_dir()],
        ..LoaderSettings::default()
    });
    config.add_handlers(handlers::builtin());
    config
}
