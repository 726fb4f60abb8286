//! Mutation Channel Tests

use mlc_domain::events::MutationEvent;
use mlc_infrastructure::cache::mutation_channel;

#[tokio::test]
async fn test_events_arrive_in_order() {
    let (sender, mut receiver) = mutation_channel(8);

    sender.emit(MutationEvent::new("task.create")).await.unwrap();
    sender
        .emit(MutationEvent::new("task.update").with_param("userId", "42"))
        .await
        .unwrap();
    drop(sender);

    let first = receiver.recv().await.unwrap();
    let second = receiver.recv().await.unwrap();
    assert_eq!(first.event_name, "task.create");
    assert_eq!(second.scope_params.get("userId").map(String::as_str), Some("42"));
    assert!(receiver.recv().await.is_none());
}

#[tokio::test]
async fn test_try_emit_reports_full_queue() {
    let (sender, _receiver) = mutation_channel(1);

    sender.try_emit(MutationEvent::new("a")).unwrap();
    let err = sender.try_emit(MutationEvent::new("b")).unwrap_err();
    assert!(err.to_string().contains("full"));
}

#[tokio::test]
async fn test_emit_after_receiver_dropped() {
    let (sender, receiver) = mutation_channel(4);
    drop(receiver);

    assert!(sender.emit(MutationEvent::new("a")).await.is_err());
    assert!(sender.try_emit(MutationEvent::new("b")).is_err());
}

#[test]
fn test_is_last_tracks_clones() {
    let (sender, _receiver) = mutation_channel(4);
    assert!(sender.is_last());

    let clone = sender.clone();
    assert!(!sender.is_last());
    drop(clone);
    assert!(sender.is_last());
}
