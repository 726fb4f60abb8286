//! JSON warming fixtures for `mlc run --warm`
//!
//! ```json
//! {
//!   "user_profile": [
//!     { "scope": { "userId": "1" }, "value": { "name": "Ada" } }
//!   ]
//! }
//! ```
//!
//! Top-level keys are pattern names. Only patterns registered with
//! `warming_enabled = true` are warmed.

use async_trait::async_trait;
use mlc_domain::error::{Error, Result};
use mlc_domain::value_objects::{PatternDefinition, ScopeParams};
use mlc_infrastructure::ErrorContext;
use mlc_infrastructure::cache::WarmingStrategy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One value to warm
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    /// Placeholder values
    #[serde(default)]
    pub scope: ScopeParams,
    /// Value stored under the resolved key
    pub value: serde_json::Value,
}

/// Warming strategy serving values from a fixture
#[derive(Debug, Default)]
pub struct FixtureWarmer {
    entries: BTreeMap<String, Vec<FixtureEntry>>,
}

impl FixtureWarmer {
    /// Parse fixture JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// Read and parse a fixture file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).io_context("Failed to read fixture")?;
        Self::from_json(&json)
    }

    /// Number of values across all patterns
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the fixture holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl WarmingStrategy for FixtureWarmer {
    async fn targets(&self, pattern: &PatternDefinition) -> Result<Vec<ScopeParams>> {
        Ok(self
            .entries
            .get(&pattern.name)
            .map(|entries| entries.iter().map(|e| e.scope.clone()).collect())
            .unwrap_or_default())
    }

    async fn load(
        &self,
        pattern: &PatternDefinition,
        scope: &ScopeParams,
    ) -> Result<serde_json::Value> {
        self.entries
            .get(&pattern.name)
            .and_then(|entries| entries.iter().find(|e| &e.scope == scope))
            .map(|e| e.value.clone())
            .ok_or_else(|| {
                Error::infrastructure(format!("No fixture value for pattern '{}'", pattern.name))
            })
    }
}
