//! Pattern Registry Tests

use mlc_domain::error::Error;
use mlc_domain::events::MutationEvent;
use mlc_domain::value_objects::{PatternDefinition, ScopeParams};
use mlc_infrastructure::cache::PatternRegistry;

fn params(pairs: &[(&str, &str)]) -> ScopeParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn task_registry() -> PatternRegistry {
    PatternRegistry::from_definitions([
        PatternDefinition::new("task_list_page", "tasks:{userId}:page:{page}", 600)
            .invalidated_by("task.update"),
        PatternDefinition::new("task_any", "tasks:{userId}:*", 120).invalidated_by("task.update"),
        PatternDefinition::new("user_profile", "user:{userId}", 3600).with_warming(true),
    ])
    .unwrap()
}

#[test]
fn test_resolve_substitutes_placeholders() {
    let registry = task_registry();
    let key = registry
        .resolve("task_list_page", &params(&[("userId", "42"), ("page", "1")]))
        .unwrap();
    assert_eq!(key.as_str(), "tasks:42:page:1");
}

#[test]
fn test_resolve_missing_parameter() {
    let registry = task_registry();
    let err = registry
        .resolve("task_list_page", &params(&[("userId", "42")]))
        .unwrap_err();
    match err {
        Error::MissingParameter { parameter, .. } => assert_eq!(parameter, "page"),
        other => panic!("expected MissingParameter, got {other:?}"),
    }
}

#[test]
fn test_resolve_unknown_pattern() {
    let registry = task_registry();
    let err = registry.resolve("nope", &ScopeParams::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownPattern { .. }));
    assert!(err.is_caller_error());
}

#[test]
fn test_register_rejects_malformed_template() {
    let registry = PatternRegistry::new();
    let err = registry
        .register(PatternDefinition::new("broken", "tasks:{userId", 60))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_match_key_prefers_most_specific() {
    let registry = task_registry();

    let page = registry.match_key("tasks:42:page:1").unwrap();
    assert_eq!(page.name, "task_list_page");

    let other = registry.match_key("tasks:42:archive").unwrap();
    assert_eq!(other.name, "task_any");

    assert!(registry.match_key("projects:1").is_none());
}

#[test]
fn test_match_key_tie_goes_to_first_registration() {
    let registry = PatternRegistry::from_definitions([
        PatternDefinition::new("first", "user:{id}", 10),
        PatternDefinition::new("second", "user:*", 20),
    ])
    .unwrap();
    assert_eq!(registry.match_key("user:7").unwrap().name, "first");
}

#[test]
fn test_register_replaces_in_place() {
    let registry = task_registry();
    registry
        .register(PatternDefinition::new("task_list_page", "tasks:{userId}:page:{page}", 30))
        .unwrap();

    let names: Vec<String> = registry.all().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["task_list_page", "task_any", "user_profile"]);
    assert_eq!(registry.get("task_list_page").unwrap().ttl_secs, 30);
}

#[test]
fn test_invalidation_targets_fill_scope() {
    let registry = task_registry();
    let event = MutationEvent::new("task.update").with_param("userId", "42");

    let targets = registry.invalidation_targets(&event).unwrap();
    let patterns: Vec<&str> = targets.iter().map(|t| t.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["tasks:42:page:*", "tasks:42:*"]);
}

#[test]
fn test_invalidation_targets_escape_scope_values() {
    let registry = task_registry();
    let event = MutationEvent::new("task.update").with_param("userId", "4{2");

    let targets = registry.invalidation_targets(&event).unwrap();
    let patterns: Vec<&str> = targets.iter().map(|t| t.pattern.as_str()).collect();
    assert_eq!(patterns, vec![r"tasks:4\{2:page:*", r"tasks:4\{2:*"]);
}

#[test]
fn test_invalidation_targets_widen_missing_placeholders() {
    let registry = task_registry();
    let event = MutationEvent::new("task.update");

    let targets = registry.invalidation_targets(&event).unwrap();
    assert_eq!(targets[1].pattern, "tasks:*:*");
}

#[test]
fn test_patterns_for_event_and_warmable() {
    let registry = task_registry();

    assert_eq!(registry.patterns_for_event("task.update").len(), 2);
    assert!(registry.patterns_for_event("task.create").is_empty());

    let warmable = registry.warmable();
    assert_eq!(warmable.len(), 1);
    assert_eq!(warmable[0].name, "user_profile");
}
