//! Configuration types

pub mod app;
pub mod cache;
pub mod logging;

pub use app::AppConfig;
pub use cache::{BusConfig, BusProvider, CacheConfig, L1Config, L1Provider, L2Config, L2Provider};
pub use logging::LoggingConfig;
