//! Pattern registry
//!
//! Named resource families: key template, TTL, warming flag and the
//! mutation events that invalidate them. Definitions are compiled once on
//! registration and kept in registration order, which breaks ties in
//! [`PatternRegistry::match_key`].

use mlc_domain::error::{Error, Result};
use mlc_domain::events::MutationEvent;
use mlc_domain::value_objects::{CacheKey, KeyPattern, MissingParams, PatternDefinition, ScopeParams};
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct RegisteredPattern {
    definition: PatternDefinition,
    pattern: KeyPattern,
}

/// Invalidation derived from a mutation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationTarget {
    /// Name of the pattern that listens to the event
    pub pattern_name: String,
    /// Template filled from the event scope, missing placeholders widened to `*`
    pub pattern: String,
}

/// Thread-safe registry of [`PatternDefinition`]s
#[derive(Debug, Default)]
pub struct PatternRegistry {
    patterns: RwLock<Vec<RegisteredPattern>>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with `definitions`
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = PatternDefinition>,
    {
        let registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Register a definition, replacing any previous one with the same name
    ///
    /// A replaced definition keeps its original registration position.
    pub fn register(&self, definition: PatternDefinition) -> Result<()> {
        let pattern = definition.compile()?;
        let mut patterns = self.patterns.write();
        let registered = RegisteredPattern {
            definition,
            pattern,
        };
        match patterns
            .iter_mut()
            .find(|p| p.definition.name == registered.definition.name)
        {
            Some(existing) => {
                debug!(name = %registered.definition.name, "Replacing cache pattern");
                *existing = registered;
            }
            None => {
                debug!(name = %registered.definition.name, template = %registered.definition.key_template, "Registered cache pattern");
                patterns.push(registered);
            }
        }
        Ok(())
    }

    /// Build the concrete key for pattern `name`
    pub fn resolve(&self, name: &str, params: &ScopeParams) -> Result<CacheKey> {
        let patterns = self.patterns.read();
        let registered = patterns
            .iter()
            .find(|p| p.definition.name == name)
            .ok_or_else(|| Error::unknown_pattern(name))?;
        registered.pattern.resolve(params)
    }

    /// Definition whose template matches `key`
    ///
    /// The template with the most literal characters wins; ties go to the
    /// earliest registration.
    pub fn match_key(&self, key: &str) -> Option<PatternDefinition> {
        let patterns = self.patterns.read();
        let mut best: Option<&RegisteredPattern> = None;
        for candidate in patterns.iter().filter(|p| p.pattern.matches(key)) {
            let better = best.is_none_or(|current| {
                candidate.pattern.literal_len() > current.pattern.literal_len()
            });
            if better {
                best = Some(candidate);
            }
        }
        best.map(|p| p.definition.clone())
    }

    /// Definitions invalidated by `event_name`, in registration order
    pub fn patterns_for_event(&self, event_name: &str) -> Vec<PatternDefinition> {
        self.patterns
            .read()
            .iter()
            .filter(|p| p.definition.is_invalidated_by(event_name))
            .map(|p| p.definition.clone())
            .collect()
    }

    /// Invalidation patterns for a mutation event
    ///
    /// Placeholders absent from the event scope become `*`, so an
    /// under-specified event invalidates more keys, never fewer.
    pub fn invalidation_targets(&self, event: &MutationEvent) -> Result<Vec<InvalidationTarget>> {
        self.patterns
            .read()
            .iter()
            .filter(|p| p.definition.is_invalidated_by(&event.event_name))
            .map(|p| {
                let pattern = p.pattern.fill(&event.scope_params, MissingParams::Widen)?;
                Ok(InvalidationTarget {
                    pattern_name: p.definition.name.clone(),
                    pattern,
                })
            })
            .collect()
    }

    /// Definitions with warming enabled
    pub fn warmable(&self) -> Vec<PatternDefinition> {
        self.patterns
            .read()
            .iter()
            .filter(|p| p.definition.warming_enabled)
            .map(|p| p.definition.clone())
            .collect()
    }

    /// Definition registered under `name`
    pub fn get(&self, name: &str) -> Option<PatternDefinition> {
        self.patterns
            .read()
            .iter()
            .find(|p| p.definition.name == name)
            .map(|p| p.definition.clone())
    }

    /// Every definition in registration order
    pub fn all(&self) -> Vec<PatternDefinition> {
        self.patterns
            .read()
            .iter()
            .map(|p| p.definition.clone())
            .collect()
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.patterns.read().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.patterns.read().is_empty()
    }
}
