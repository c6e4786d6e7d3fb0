use std::path::PathBuf;

use moo_core::config::{MooConfig, SourceEntry, DEFAULT_SOURCE_URL};
use moo_util::errors::MooError;
use tempfile::TempDir;

#[test]
fn test_default_config_uses_nuget_feed() {
    let config = MooConfig::for_home("/tmp/moo-home");
    assert_eq!(config.sources.len(), 1);
    assert_eq!(config.sources[0].url, DEFAULT_SOURCE_URL);
    assert!(config.sources[0].is_remote());
}

#[test]
fn test_default_dirs_live_under_home() {
    let config = MooConfig::for_home("/tmp/moo-home");
    assert_eq!(config.moo_dir(), PathBuf::from("/tmp/moo-home/packages"));
    assert_eq!(config.cache_dir(), PathBuf::from("/tmp/moo-home/cache"));
    assert_eq!(
        config.config_path(),
        PathBuf::from("/tmp/moo-home/config.toml")
    );
}

#[test]
fn test_parse_from_toml() {
    let toml = r#"
moo-dir = "/opt/packages"
api-key = "secret"

[[source]]
name = "local"
url = "/srv/nupkgs"

[[source]]
name = "corp"
url = "https://nuget.corp.example/api/v2"
"#;
    let config = MooConfig::parse_toml(toml).unwrap();
    assert_eq!(config.moo_dir(), PathBuf::from("/opt/packages"));
    assert_eq!(config.api_key.as_deref(), Some("secret"));
    assert_eq!(
        config.sources,
        vec![
            SourceEntry::new("local", "/srv/nupkgs"),
            SourceEntry::new("corp", "https://nuget.corp.example/api/v2"),
        ]
    );
    assert!(!config.sources[0].is_remote());
    assert!(config.source("CORP").is_some());
    assert!(config.source("missing").is_none());
}

#[test]
fn test_empty_toml_gets_default_source() {
    let config = MooConfig::parse_toml("").unwrap();
    assert_eq!(config.sources[0].name, "nuget");
}

#[test]
fn test_bad_toml_is_config_error() {
    let err = MooConfig::parse_toml("moo-dir = [").unwrap_err();
    assert!(matches!(err, MooError::Config { .. }));
}

#[test]
fn test_load_from_missing_file_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = MooConfig::load_from(tmp.path()).unwrap();
    assert_eq!(config.home, tmp.path());
    assert_eq!(config.moo_dir(), tmp.path().join("packages"));
}

#[test]
fn test_load_from_file_sets_home() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "[[source]]\nname = \"disk\"\nurl = \"/pkgs\"\n",
    )
    .unwrap();
    let config = MooConfig::load_from(tmp.path()).unwrap();
    assert_eq!(config.home, tmp.path());
    assert_eq!(config.sources[0].name, "disk");
}

#[test]
fn test_env_overrides() {
    let mut config = MooConfig::for_home("/h");
    config.apply_env_overrides(|key| match key {
        "MOO_DIR" => Some("/elsewhere".to_string()),
        "MOO_API_KEY" => Some("k".to_string()),
        _ => None,
    });
    assert_eq!(config.moo_dir(), PathBuf::from("/elsewhere"));
    assert_eq!(config.api_key.as_deref(), Some("k"));
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config = MooConfig::for_home("/h");
    config.apply_env_overrides(|_| Some(String::new()));
    assert_eq!(config.moo_dir(), PathBuf::from("/h/packages"));
    assert!(config.api_key.is_none());
}
