//! Cache health reporting
//!
//! Point-in-time view of both tiers and the bus, used by the `health` CLI
//! command and by hosts exposing a health endpoint.

use serde::{Deserialize, Serialize};

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Both tiers reachable
    Up,
    /// L2 unreachable, serving from L1 only
    Degraded,
}

impl HealthStatus {
    /// Check if the status indicates the cache is healthy
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Health of one cache manager instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHealth {
    /// Overall status
    pub status: HealthStatus,
    /// Id tagged on published invalidations
    pub instance_id: String,
    /// Live L1 entries
    pub l1_entries: usize,
    /// L1 provider name
    pub l1_provider: String,
    /// L2 provider name
    pub l2_provider: String,
    /// Whether L2 answered a ping
    pub l2_available: bool,
    /// Ping failure, when L2 is unavailable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2_error: Option<String>,
    /// Invalidation bus provider name
    pub bus_provider: String,
    /// Invalidation channel
    pub bus_channel: String,
    /// Registered patterns
    pub patterns: usize,
}
