//! Null distributed store
//!
//! Stores nothing and always succeeds.

use async_trait::async_trait;
use mlc_domain::error::Result;
use mlc_domain::ports::providers::DistributedStore;
use std::time::Duration;

/// No-op distributed store
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDistributedStore;

impl NullDistributedStore {
    /// Create a new null distributed store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DistributedStore for NullDistributedStore {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<usize> {
        Ok(0)
    }

    async fn keys_matching(&self, _glob: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
