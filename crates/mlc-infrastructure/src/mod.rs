//! # Infrastructure Layer
//!
//! Everything between the provider implementations and a running cache
//! instance.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | `CacheManager` facade, pattern registry, warming, wrapping |
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`di`] | Builds providers and the manager from `AppConfig` |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`health`] | Tier and bus health reporting |
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod health;
pub mod logging;

pub use cache::CacheManager;
pub use config::AppConfig;
pub use error_ext::ErrorContext;
