//! Cache warming
//!
//! Pre-populates resource families flagged `warming_enabled`. A
//! [`WarmingStrategy`] decides which scopes to warm (most active users,
//! first listing pages) and how to load each value. One failing key never
//! aborts the batch; failures are collected in the [`WarmingReport`].

use crate::cache::manager::CacheManager;
use async_trait::async_trait;
use mlc_domain::error::Result;
use mlc_domain::value_objects::{PatternDefinition, ScopeParams, SetOptions};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Source of values to warm
#[async_trait]
pub trait WarmingStrategy: Send + Sync {
    /// Scopes to warm for `pattern`
    async fn targets(&self, pattern: &PatternDefinition) -> Result<Vec<ScopeParams>>;

    /// Compute the value for one scope
    async fn load(&self, pattern: &PatternDefinition, scope: &ScopeParams)
    -> Result<serde_json::Value>;
}

/// One key (or whole pattern) that could not be warmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmingFailure {
    /// Pattern name
    pub pattern: String,
    /// Key being warmed, `None` when listing targets failed
    pub key: Option<String>,
    /// Error message
    pub error: String,
}

/// Outcome of a warming run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmingReport {
    /// Keys stored
    pub warmed: usize,
    /// Keys or patterns that failed
    pub failures: Vec<WarmingFailure>,
}

impl WarmingReport {
    /// Whether every target was warmed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl CacheManager {
    /// Warm every pattern with warming enabled
    pub async fn warm(&self, strategy: &dyn WarmingStrategy) -> WarmingReport {
        let mut report = WarmingReport::default();

        for pattern in self.registry().warmable() {
            let targets = match strategy.targets(&pattern).await {
                Ok(targets) => targets,
                Err(e) => {
                    warn!(pattern = %pattern.name, error = %e, "Listing warming targets failed");
                    report.failures.push(WarmingFailure {
                        pattern: pattern.name.clone(),
                        key: None,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            for scope in targets {
                if let Err(failure) = self.warm_one(strategy, &pattern, &scope).await {
                    report.failures.push(failure);
                } else {
                    report.warmed += 1;
                }
            }
        }

        info!(
            warmed = report.warmed,
            failed = report.failures.len(),
            "Cache warming finished"
        );
        report
    }

    async fn warm_one(
        &self,
        strategy: &dyn WarmingStrategy,
        pattern: &PatternDefinition,
        scope: &ScopeParams,
    ) -> std::result::Result<(), WarmingFailure> {
        let failure = |key: Option<String>, error: String| WarmingFailure {
            pattern: pattern.name.clone(),
            key,
            error,
        };

        let key = self
            .key_for(&pattern.name, scope)
            .map_err(|e| failure(None, e.to_string()))?;
        let value = strategy
            .load(pattern, scope)
            .await
            .map_err(|e| failure(Some(key.to_string()), e.to_string()))?;
        self.set(key.as_str(), &value, SetOptions::ttl(pattern.ttl()))
            .await
            .map_err(|e| failure(Some(key.to_string()), e.to_string()))?;

        self.metrics().record_warming_event();
        Ok(())
    }
}
