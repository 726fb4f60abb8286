//! Shared utilities for provider implementations

pub mod glob;
#[cfg(any(feature = "cache-redis", feature = "events-redis"))]
pub mod redis;

pub use glob::glob_match;
