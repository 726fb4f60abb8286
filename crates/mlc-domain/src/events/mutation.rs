//! Domain mutation events
//!
//! Emitted by whatever changes authoritative data (task CRUD, database
//! sync). The cache translates each event into invalidations through the
//! `invalidating_events` of registered patterns.

use crate::value_objects::ScopeParams;
use serde::{Deserialize, Serialize};

/// A resource changed
///
/// # Example
///
/// ```
/// use mlc_domain::events::MutationEvent;
///
/// let event = MutationEvent::new("task.update").with_param("userId", "42");
/// assert_eq!(event.scope_params.get("userId").map(String::as_str), Some("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationEvent {
    /// Event name, e.g. `task.update`
    pub event_name: String,
    /// Placeholder values scoping the change, e.g. `userId = 42`
    #[serde(default)]
    pub scope_params: ScopeParams,
}

impl MutationEvent {
    /// Create an event with an empty scope
    pub fn new<S: Into<String>>(event_name: S) -> Self {
        Self {
            event_name: event_name.into(),
            scope_params: ScopeParams::new(),
        }
    }

    /// Add a scope parameter
    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.scope_params.insert(key.into(), value.into());
        self
    }
}
