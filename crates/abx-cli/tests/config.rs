use abx_cli::config::{AbxConfig, LogFormat, load_config, save_config};

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, AbxConfig::default());
    assert_eq!(config.log_filter, "info");
    assert_eq!(config.label_separator, ", ");
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abx").join("config.json");
    let config = AbxConfig {
        log_format: LogFormat::Json,
        actor: "labman".to_string(),
        ..AbxConfig::default()
    };

    save_config(&config, &path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"actor": "labman", "log_format": "json"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.actor, "labman");
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn newer_config_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 99}"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}
