//! Module resolution and loading from disk.

use std::fs;

use confstar::{handlers, Config, ConfigError, LoaderSettings, Value};

mod common;

#[test]
fn test_load_by_path_names_module_after_file() {
    let mut config = common::fixture_config();
    let report = config
        .load_by_path(common::fixtures_dir().join("limits.toml"))
        .unwrap();

    assert_eq!(report.module, "limits");
    assert_eq!(report.installed, ["MAX_RETRIES", "BACKOFF_FACTOR"]);
    assert_eq!(config.field("MAX_RETRIES").unwrap().module(), Some("limits"));
    assert_eq!(config.get("BACKOFF_FACTOR").unwrap().as_float(), Some(1.5));

    assert!(config.set("BACKOFF_FACTOR", 4.5).is_err());
    config.set("BACKOFF_FACTOR", 2).unwrap();
}

#[test]
fn test_fields_aggregate_across_modules() {
    let mut config = common::fixture_config();
    config.import_module("app.config").unwrap();
    config.import_module("limits").unwrap();

    assert_eq!(config.len(), 7);
    assert_eq!(
        config.field_names().collect::<Vec<_>>(),
        [
            "PRIVATE_INT_FIELD",
            "PUBLIC_MIN_FIELD",
            "PUBLIC_MAX_FIELD",
            "PUBLIC_RANGE_FIELD",
            "GUARDED_NAME",
            "MAX_RETRIES",
            "BACKOFF_FACTOR",
        ]
    );
}

#[test]
fn test_second_import_redeclares_fields() {
    let mut config = common::fixture_config();
    config.import_module("app.config").unwrap();
    config.set("PUBLIC_RANGE_FIELD", 2).unwrap();

    let report = config.import_module("app.config").unwrap();
    assert_eq!(report.installed.len(), 5);
    assert_eq!(config.len(), 5);
    assert_eq!(config.get("PUBLIC_RANGE_FIELD").unwrap(), &Value::from(4));
    assert_eq!(config.get("PRIVATE_INT_FIELD").unwrap(), &Value::from(123));
    assert!(matches!(
        config.set("PRIVATE_INT_FIELD", 321),
        Err(ConfigError::DuplicateAssignment { .. })
    ));
}

#[test]
fn test_search_paths_in_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::create_dir_all(second.path().join("svc")).unwrap();
    fs::write(
        second.path().join("svc").join("db.toml"),
        "POOL_SIZE = { annotation = \"Range[1, 64]\", value = 8 }\n",
    )
    .unwrap();

    let settings = LoaderSettings {
        search_paths: vec![first.path().to_path_buf()],
        ..LoaderSettings::default()
    }
    .with_search_path(second.path());
    let mut config = Config::new().with_settings(settings);
    config.add_handlers(handlers::builtin());

    config.import_module("svc.db").unwrap();
    assert_eq!(config.get("POOL_SIZE").unwrap(), &Value::from(8));

    fs::create_dir_all(first.path().join("svc")).unwrap();
    fs::write(
        first.path().join("svc").join("db.toml"),
        "POOL_SIZE = { annotation = \"Range[1, 64]\", value = 16 }\n",
    )
    .unwrap();
    config.import_module("svc.db").unwrap();
    assert_eq!(config.get("POOL_SIZE").unwrap(), &Value::from(16));
}

#[test]
fn test_missing_module_and_file() {
    let mut config = common::fixture_config();
    assert!(matches!(
        config.import_module("app.missing"),
        Err(ConfigError::ModuleNotFound { .. })
    ));
    assert!(matches!(
        config.load_by_path(common::fixtures_dir().join("missing.toml")),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loader.toml");
    fs::write(&path, "extension = \"conf\"\n").unwrap();

    let settings = LoaderSettings::from_file(&path).unwrap();
    assert_eq!(settings.extension, "conf");
    assert_eq!(settings, LoaderSettings { extension: "conf".into(), ..Default::default() });
}
