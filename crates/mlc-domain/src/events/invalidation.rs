//! Invalidation bus messages

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Instruction broadcast to every instance: drop keys matching `pattern`
///
/// Serialized as `{"pattern": "...", "reason": "..."}`. `origin` is
/// informational only and is omitted when absent; receivers never use it to
/// skip their own messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationMessage {
    /// Exact key or wildcard pattern
    pub pattern: String,
    /// Why the keys are dropped (event name or caller-supplied reason)
    pub reason: String,
    /// Instance that published the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl InvalidationMessage {
    /// Create a message without origin
    pub fn new<P: Into<String>, R: Into<String>>(pattern: P, reason: R) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
            origin: None,
        }
    }

    /// Tag the message with the publishing instance
    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Encode as the JSON wire payload
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON wire payload
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
