//! Root application configuration

use super::{CacheConfig, LoggingConfig};
use mlc_domain::value_objects::PatternDefinition;
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [logging]
/// level = "info"
///
/// [cache.l2]
/// provider = "redis"
/// url = "redis://localhost:6379"
///
/// [[patterns]]
/// name = "user_tasks"
/// key_template = "tasks:{userId}:*"
/// ttl_secs = 300
/// invalidating_events = ["task.update"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Logging section
    pub logging: LoggingConfig,

    /// Cache tiers and bus
    pub cache: CacheConfig,

    /// Resource families registered at startup
    pub patterns: Vec<PatternDefinition>,
}
