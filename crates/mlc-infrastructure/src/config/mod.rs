//! Configuration
//!
//! Typed configuration sections and the figment-based loader.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    AppConfig, BusConfig, BusProvider, CacheConfig, L1Config, L1Provider, L2Config, L2Provider,
    LoggingConfig,
};
