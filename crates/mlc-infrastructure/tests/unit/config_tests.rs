//! Configuration Loader Tests

use mlc_domain::error::Error;
use mlc_domain::value_objects::PatternDefinition;
use mlc_infrastructure::config::{
    AppConfig, BusProvider, CacheConfig, ConfigBuilder, ConfigLoader, L1Provider, L2Config,
    L2Provider, LoggingConfig,
};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("mlc.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.cache.default_ttl_secs, 300);
    assert_eq!(config.cache.l1.provider, L1Provider::Lru);
    assert_eq!(config.cache.l1.capacity, 10_000);
    assert_eq!(config.cache.l2.provider, L2Provider::Memory);
    assert_eq!(config.cache.bus.provider, BusProvider::Tokio);
    assert_eq!(config.cache.bus.channel, "cache:invalidate");
    assert!(config.patterns.is_empty());
}

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[logging]
level = "debug"

[cache]
default_ttl_secs = 120

[cache.l1]
capacity = 500

[cache.l2]
provider = "redis"
host = "cache.internal"
password = "secret"
db = 2
namespace = "app"

[cache.bus]
provider = "redis"
channel = "app:invalidate"

[[patterns]]
name = "task_list_page"
key_template = "tasks:{userId}:*"
ttl_secs = 600
invalidating_events = ["task.update", "task.delete"]
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("MLC_TEST_TOML")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.cache.default_ttl_secs, 120);
    assert_eq!(config.cache.l1.capacity, 500);
    assert_eq!(config.cache.l2.provider, L2Provider::Redis);
    assert_eq!(
        config.cache.l2.connection_url().as_deref(),
        Some("redis://:secret@cache.internal:6379/2")
    );
    assert_eq!(config.cache.l2.namespace.as_deref(), Some("app"));
    assert_eq!(config.cache.bus.channel, "app:invalidate");

    assert_eq!(config.patterns.len(), 1);
    let pattern = &config.patterns[0];
    assert_eq!(pattern.ttl_secs, 600);
    assert!(pattern.is_invalidated_by("task.delete"));
    assert!(!pattern.warming_enabled);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix("MLC_TEST_ABSENT")
        .load()
        .unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_pattern_template_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[patterns]]
name = "broken"
key_template = "tasks:{userId"
ttl_secs = 60
"#,
    );

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("MLC_TEST_BROKEN")
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_redis_without_address_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache.l2]\nprovider = \"redis\"\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("MLC_TEST_NOADDR")
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("cache.l2.url"));
}

#[test]
fn test_bad_value_type_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[cache]\ndefault_ttl_secs = \"soon\"\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("MLC_TEST_BADTYPE")
        .load()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_cache(CacheConfig {
            l2: L2Config::redis("redis://127.0.0.1:6379/0"),
            ..Default::default()
        })
        .with_pattern(
            PatternDefinition::new("user_profile", "user:{userId}", 3600)
                .with_warming(true)
                .invalidated_by("user.update"),
        )
        .build()
        .unwrap();

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("MLC_TEST_SAVE");
    loader.save_to_file(&original, &path).unwrap();
    let reloaded = loader.load().unwrap();

    assert_eq!(reloaded, original);
}

#[test]
fn test_builder_validates() {
    let err = ConfigBuilder::new()
        .with_logging(LoggingConfig {
            level: "chatty".to_string(),
            ..Default::default()
        })
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("chatty"));

    let err = ConfigBuilder::new()
        .with_cache(CacheConfig {
            default_ttl_secs: 0,
            ..Default::default()
        })
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));

    let err = ConfigBuilder::new()
        .with_pattern(PatternDefinition::new("zero", "zero:{id}", 0))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("zero"));
}
