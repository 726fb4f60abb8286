//! Unit tests for mutation events and invalidation messages

use mlc_domain::{InvalidationMessage, MutationEvent};

#[test]
fn test_invalidation_message_wire_shape() {
    let message = InvalidationMessage::new("tasks:42:*", "task.update");
    let json = message.to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pattern"], "tasks:42:*");
    assert_eq!(value["reason"], "task.update");
    assert!(value.get("origin").is_none());
}

#[test]
fn test_invalidation_message_accepts_minimal_payload() {
    let message =
        InvalidationMessage::from_json(r#"{"pattern":"user:1","reason":"manual"}"#).unwrap();
    assert_eq!(message.pattern, "user:1");
    assert_eq!(message.reason, "manual");
    assert_eq!(message.origin, None);
}

#[test]
fn test_invalidation_message_with_origin() {
    let message = InvalidationMessage::new("user:1", "manual").with_origin("instance-a");
    let decoded = InvalidationMessage::from_json(&message.to_json().unwrap()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_invalidation_message_rejects_garbage() {
    assert!(InvalidationMessage::from_json("user:1").is_err());
}

#[test]
fn test_mutation_event_builder() {
    let event = MutationEvent::new("task.update")
        .with_param("userId", "42")
        .with_param("page", "1");

    assert_eq!(event.event_name, "task.update");
    assert_eq!(event.scope_params.len(), 2);
    assert_eq!(event.scope_params["userId"], "42");
}

#[test]
fn test_mutation_event_scope_defaults_to_empty() {
    let event: MutationEvent = serde_json::from_str(r#"{"event_name":"user.delete"}"#).unwrap();
    assert!(event.scope_params.is_empty());
}
