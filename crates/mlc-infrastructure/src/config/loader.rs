//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment
//! variables using Figment, then validates the result.

use crate::config::{AppConfig, BusProvider, CacheConfig, L1Provider, L2Provider, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mlc_domain::error::{Error, Result};
use mlc_domain::value_objects::PatternDefinition;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `MLC__CACHE__L1__CAPACITY`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore keeps single underscores inside field names
        let prefix = format!("{}{}", self.env_prefix, CONFIG_ENV_SEPARATOR);
        figment = figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_cache_config(&config.cache)?;
    validate_patterns(&config.patterns)?;
    Ok(())
}

fn validate_cache_config(cache: &CacheConfig) -> Result<()> {
    if cache.default_ttl_secs == 0 {
        return Err(Error::configuration("Default cache TTL cannot be 0"));
    }
    if cache.mutation_queue_capacity == 0 {
        return Err(Error::configuration("Mutation queue capacity cannot be 0"));
    }
    if cache.l1.provider == L1Provider::Lru && cache.l1.capacity == 0 {
        return Err(Error::configuration("L1 capacity cannot be 0"));
    }
    if cache.l1.provider == L1Provider::Moka && cache.l1.max_bytes == 0 {
        return Err(Error::configuration("L1 max_bytes cannot be 0"));
    }
    if cache.l2.operation_timeout_ms == 0 {
        return Err(Error::configuration("L2 operation timeout cannot be 0"));
    }
    if cache.l2.scan_count == 0 {
        return Err(Error::configuration("L2 scan_count cannot be 0"));
    }
    let needs_redis =
        cache.l2.provider == L2Provider::Redis || cache.bus.provider == BusProvider::Redis;
    if needs_redis && cache.l2.connection_url().is_none() {
        return Err(Error::configuration(
            "Redis providers require cache.l2.url or cache.l2.host",
        ));
    }
    if cache.bus.channel.trim().is_empty() {
        return Err(Error::configuration("Invalidation channel cannot be empty"));
    }
    if cache.bus.capacity == 0 {
        return Err(Error::configuration("Bus capacity cannot be 0"));
    }
    Ok(())
}

fn validate_patterns(patterns: &[PatternDefinition]) -> Result<()> {
    for definition in patterns {
        if definition.name.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Pattern with template '{}' has an empty name",
                definition.key_template
            )));
        }
        if definition.ttl_secs == 0 {
            return Err(Error::configuration(format!(
                "Pattern '{}' has a TTL of 0",
                definition.name
            )));
        }
        definition.compile().map_err(|e| {
            Error::configuration_with_source(format!("Pattern '{}' is invalid", definition.name), e)
        })?;
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Add a pattern definition
    pub fn with_pattern(mut self, pattern: PatternDefinition) -> Self {
        self.config.patterns.push(pattern);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
