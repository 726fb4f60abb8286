//! Unit tests for pattern definitions and template resolution

use mlc_domain::Error;
use mlc_domain::value_objects::{PatternDefinition, ScopeParams};

fn scope(pairs: &[(&str, &str)]) -> ScopeParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_definition_builder() {
    let def = PatternDefinition::new("user_profile", "user:{id}", 3600)
        .with_warming(true)
        .invalidated_by("user.update");

    assert!(def.warming_enabled);
    assert!(def.is_invalidated_by("user.update"));
    assert!(!def.is_invalidated_by("task.update"));
    assert_eq!(def.ttl().as_secs(), 3600);
}

#[test]
fn test_definition_resolves_concrete_key() {
    let def = PatternDefinition::new("user_profile", "user:{id}", 3600);
    let key = def.compile().unwrap().resolve(&scope(&[("id", "7")])).unwrap();
    assert_eq!(key.as_str(), "user:7");
}

#[test]
fn test_definition_resolve_missing_parameter() {
    let def = PatternDefinition::new("user_profile", "user:{id}", 3600);
    let err = def.compile().unwrap().resolve(&ScopeParams::new()).unwrap_err();
    assert!(matches!(err, Error::MissingParameter { .. }));
}

#[test]
fn test_definition_deserialize_defaults() {
    let def: PatternDefinition = serde_json::from_str(
        r#"{"name":"listing","key_template":"listing:{id}","ttl_secs":120}"#,
    )
    .unwrap();
    assert!(!def.warming_enabled);
    assert!(def.invalidating_events.is_empty());
}

#[test]
fn test_resolved_wildcard_template_matches_family() {
    let def = PatternDefinition::new("task_list_page", "tasks:{userId}:*", 600);
    let pattern = def.compile().unwrap();

    assert!(pattern.matches("tasks:42:page:1"));
    assert!(pattern.matches("tasks:99:page:1"));

    let scoped = pattern.resolve(&scope(&[("userId", "42")])).unwrap();
    let scoped = mlc_domain::KeyPattern::parse(scoped.as_str()).unwrap();
    assert!(scoped.matches("tasks:42:page:1"));
    assert!(!scoped.matches("tasks:99:page:1"));
}
