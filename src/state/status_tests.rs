//! Tests for the status indicator state.

use super::*;
use crate::model::{LogEntry, LogLevel};

fn doc(name: &str) -> SourceId {
    SourceId::from(name)
}

fn log(registry: &mut LoggerRegistry, name: &str) {
    registry.log(Some(doc(name)), LogEntry::text(LogLevel::Info, "msg"));
}

#[test]
fn mutation_of_hidden_source_marks_dirty() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, false);

    log(&mut registry, "doc2");
    status.process(Some(&doc("doc1")));

    assert!(status.is_dirty(&Some(doc("doc2"))));
    assert!(!status.is_dirty(&Some(doc("doc1"))));
    assert_eq!(status.dirty_count(), 1);
}

#[test]
fn mutation_of_visible_source_is_ignored() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);

    log(&mut registry, "doc1");
    status.process(Some(&doc("doc1")));

    assert!(!status.is_dirty(&Some(doc("doc1"))));
    assert_eq!(status.flash_count(), 0);
}

#[test]
fn nothing_visible_marks_every_source_dirty() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, false);

    log(&mut registry, "doc1");
    registry.log(None, LogEntry::text(LogLevel::Info, "orphan"));
    status.process(None);

    assert!(status.is_dirty(&Some(doc("doc1"))));
    assert!(status.is_dirty(&None));
}

#[test]
fn one_flash_per_mutation_when_enabled() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);

    log(&mut registry, "doc2");
    log(&mut registry, "doc2");
    log(&mut registry, "doc3");
    status.process(Some(&doc("doc1")));

    assert_eq!(status.flash_count(), 3);
    assert!(status.is_flashing());
    assert_eq!(status.unseen_total(), 3);
}

#[test]
fn no_flash_when_disabled() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, false);

    log(&mut registry, "doc2");
    status.process(None);

    assert_eq!(status.flash_count(), 0);
    assert!(!status.is_flashing());
    assert!(status.is_dirty(&Some(doc("doc2"))));
}

#[test]
fn clear_of_hidden_source_counts_as_activity() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);

    registry.clear(Some(doc("doc2")));
    status.process(None);

    assert!(status.is_dirty(&Some(doc("doc2"))));
    assert_eq!(status.flash_count(), 1);
}

#[test]
fn truncation_does_not_dirty_a_source() {
    let mut registry = LoggerRegistry::new(10);
    log(&mut registry, "doc1");
    log(&mut registry, "doc1");
    let mut status = StatusIndicator::new(&mut registry, true);

    registry.set_max_length(1).expect("valid length");
    status.process(None);

    assert!(!status.is_dirty(&Some(doc("doc1"))));
    assert_eq!(status.flash_count(), 0);
    assert_eq!(
        status.source_status(&Some(doc("doc1"))).map(|s| s.version),
        Some(3)
    );
}

#[test]
fn acknowledge_clears_dirty_unconditionally() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, false);
    log(&mut registry, "doc2");
    log(&mut registry, "doc2");
    status.process(None);

    // An older version still clears the flag
    status.acknowledge(&doc("doc2"), 1);

    assert!(!status.is_dirty(&Some(doc("doc2"))));
    assert_eq!(status.unseen_total(), 0);
}

#[test]
fn flash_animation_runs_for_fixed_ticks() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);
    log(&mut registry, "doc2");
    status.process(None);

    let mut ticks = 0;
    while status.tick() {
        ticks += 1;
    }

    assert_eq!(ticks, usize::from(FLASH_TICKS));
    assert!(!status.is_flashing());
    assert!(!status.blink_on());
}

#[test]
fn blink_alternates_during_flash() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);
    log(&mut registry, "doc2");
    status.process(None);

    let first = status.blink_on();
    status.tick();
    let second = status.blink_on();

    assert_ne!(first, second);
}

#[test]
fn disabling_flash_stops_running_animation() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);
    log(&mut registry, "doc2");
    status.process(None);

    status.set_flash_enabled(false);

    assert!(!status.is_flashing());
    assert!(!status.flash_enabled());
}
