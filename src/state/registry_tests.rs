//! Tests for the logger registry.

use super::*;
use crate::model::{LogEntry, LogLevel, SourceId};

fn doc(name: &str) -> SourceKey {
    Some(SourceId::from(name))
}

fn entry(message: &str) -> LogEntry {
    LogEntry::text(LogLevel::Info, message)
}

fn messages(registry: &LoggerRegistry, source: &SourceKey) -> Vec<String> {
    registry
        .buffer(source)
        .map(|b| b.iter().filter_map(|e| e.as_text().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[test]
fn get_logger_creates_buffer_lazily() {
    let mut registry = LoggerRegistry::new(10);
    assert!(registry.buffer(&doc("doc1")).is_none());

    registry.get_logger(doc("doc1"));

    let buffer = registry.buffer(&doc("doc1")).expect("buffer should exist");
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 10);
}

#[test]
fn get_logger_returns_shared_identity_for_equal_keys() {
    let mut registry = LoggerRegistry::new(10);

    registry.get_logger(doc("doc1")).append(entry("from first handle"));
    let second = registry.get_logger(doc("doc1"));

    assert_eq!(second.buffer().len(), 1);
    assert_eq!(second.buffer().version(), 1);
    assert_eq!(registry.sources().len(), 1);
}

#[test]
fn null_source_is_a_distinct_key() {
    let mut registry = LoggerRegistry::new(10);

    registry.log(None, entry("orphan"));
    registry.log(doc("doc1"), entry("owned"));

    assert_eq!(messages(&registry, &None), vec!["orphan"]);
    assert_eq!(messages(&registry, &doc("doc1")), vec!["owned"]);
}

#[test]
fn sources_are_listed_in_first_access_order() {
    let mut registry = LoggerRegistry::new(10);

    registry.log(doc("b"), entry("1"));
    registry.log(doc("a"), entry("2"));
    registry.log(doc("b"), entry("3"));

    assert_eq!(registry.sources(), &[doc("b"), doc("a")]);
}

#[test]
fn set_max_length_truncates_existing_buffers_oldest_first() {
    let mut registry = LoggerRegistry::new(10);
    for m in ["a", "b", "c", "d"] {
        registry.log(doc("doc1"), entry(m));
    }
    registry.log(doc("doc2"), entry("x"));

    registry.set_max_length(2).expect("valid length");

    assert_eq!(messages(&registry, &doc("doc1")), vec!["c", "d"]);
    assert_eq!(messages(&registry, &doc("doc2")), vec!["x"]);
}

#[test]
fn set_max_length_applies_to_buffers_created_later() {
    let mut registry = LoggerRegistry::new(10);

    registry.set_max_length(3).expect("valid length");
    let logger = registry.get_logger(doc("late"));

    assert_eq!(logger.buffer().capacity(), 3);
}

#[test]
fn set_max_length_rejects_negative_without_side_effects() {
    let mut registry = LoggerRegistry::new(10);
    registry.log(doc("doc1"), entry("a"));

    let result = registry.set_max_length(-1);

    assert_eq!(result, Err(LogError::InvalidArgument { requested: -1 }));
    assert_eq!(registry.max_length(), 10);
    assert_eq!(registry.buffer(&doc("doc1")).map(|b| b.capacity()), Some(10));
}

#[test]
fn every_mutation_is_announced_in_order() {
    let mut registry = LoggerRegistry::new(2);
    let subscription = registry.subscribe(SubscriptionFilter::All);

    registry.log(doc("doc1"), entry("a"));
    registry.log(doc("doc2"), entry("b"));
    registry.clear(doc("doc1"));

    let events = subscription.drain();
    assert_eq!(
        events,
        vec![
            MutationEvent {
                source: doc("doc1"),
                version: 1,
                kind: MutationKind::Append
            },
            MutationEvent {
                source: doc("doc2"),
                version: 1,
                kind: MutationKind::Append
            },
            MutationEvent {
                source: doc("doc1"),
                version: 2,
                kind: MutationKind::Clear
            },
        ]
    );
    assert!(!subscription.has_pending());
}

#[test]
fn appends_are_not_coalesced() {
    let mut registry = LoggerRegistry::new(10);
    let subscription = registry.subscribe(SubscriptionFilter::All);

    for i in 0..5 {
        registry.log(doc("doc1"), entry(&i.to_string()));
    }

    let versions: Vec<u64> = subscription.drain().iter().map(|e| e.version).collect();
    assert_eq!(versions, vec![1, 2, 3, 4, 5]);
}

#[test]
fn truncation_is_announced() {
    let mut registry = LoggerRegistry::new(10);
    registry.log(doc("doc1"), entry("a"));
    registry.log(doc("doc1"), entry("b"));
    registry.log(doc("doc2"), entry("c"));
    let subscription = registry.subscribe(SubscriptionFilter::All);

    registry.set_max_length(1).expect("valid length");

    assert_eq!(
        subscription.drain(),
        vec![MutationEvent {
            source: doc("doc1"),
            version: 3,
            kind: MutationKind::Truncate
        }]
    );
}

#[test]
fn source_filter_only_receives_its_source() {
    let mut registry = LoggerRegistry::new(10);
    let subscription = registry.subscribe(SubscriptionFilter::Source(doc("doc2")));

    registry.log(doc("doc1"), entry("ignored"));
    registry.log(doc("doc2"), entry("seen"));

    let events = subscription.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, doc("doc2"));
}

#[test]
fn dropping_subscription_unsubscribes() {
    let mut registry = LoggerRegistry::new(10);
    let kept = registry.subscribe(SubscriptionFilter::All);
    let dropped = registry.subscribe(SubscriptionFilter::All);
    assert_eq!(registry.listener_count(), 2);

    drop(dropped);
    registry.log(doc("doc1"), entry("a"));

    assert_eq!(registry.listener_count(), 1);
    assert_eq!(kept.drain().len(), 1);
}

#[test]
fn entries_below_level_threshold_are_dropped_silently() {
    let mut registry = LoggerRegistry::new(10);
    let subscription = registry.subscribe(SubscriptionFilter::All);
    registry.get_logger(doc("doc1")).set_level(LogLevel::Warning);

    let skipped = registry.log(doc("doc1"), LogEntry::text(LogLevel::Info, "quiet"));
    let kept = registry.log(doc("doc1"), LogEntry::text(LogLevel::Error, "loud"));

    assert_eq!(skipped, None);
    assert_eq!(kept, Some(1));
    assert_eq!(messages(&registry, &doc("doc1")), vec!["loud"]);
    assert_eq!(subscription.drain().len(), 1);
}

#[test]
fn default_level_applies_to_new_buffers_only() {
    let mut registry = LoggerRegistry::new(10);
    registry.get_logger(doc("early"));

    registry.set_default_level(LogLevel::Error);
    registry.get_logger(doc("late"));

    assert_eq!(registry.buffer(&doc("early")).map(|b| b.level()), Some(LogLevel::Debug));
    assert_eq!(registry.buffer(&doc("late")).map(|b| b.level()), Some(LogLevel::Error));
}

#[test]
fn default_registry_uses_one_thousand_entries() {
    let registry = LoggerRegistry::default();
    assert_eq!(registry.max_length(), DEFAULT_MAX_LENGTH);
    assert_eq!(DEFAULT_MAX_LENGTH, 1000);
}
