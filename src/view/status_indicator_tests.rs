//! Tests for StatusIndicatorView widget.

use super::*;
use crate::model::{LogEntry, LogLevel, SourceId};
use crate::state::LoggerRegistry;
use ratatui::style::{Color, Modifier, Style};

// ===== Idle =====

#[test]
fn idle_indicator_renders_gray() {
    let span = StatusIndicatorView::new(0, false).render();

    assert_eq!(span.content, "[LOG] ");
    assert_eq!(span.style, Style::default().fg(Color::Gray));
}

// ===== Unseen activity =====

#[test]
fn unseen_count_is_shown_in_yellow() {
    let span = StatusIndicatorView::new(3, false).render();

    assert_eq!(span.content, "[LOG 3] ");
    assert_eq!(span.style, Style::default().fg(Color::Yellow));
}

#[test]
fn blink_phase_highlights_indicator() {
    let span = StatusIndicatorView::new(1, true).render();

    assert_eq!(span.content, "[LOG 1] ");
    assert_eq!(span.style.bg, Some(Color::Yellow));
    assert!(span.style.add_modifier.contains(Modifier::BOLD));
}

#[test]
fn blink_toggle_changes_style_but_not_text() {
    let on = StatusIndicatorView::new(2, true).render();
    let off = StatusIndicatorView::new(2, false).render();

    assert_eq!(on.content, off.content);
    assert_ne!(on.style, off.style);
}

// ===== From state =====

#[test]
fn from_state_reflects_flash_in_progress() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, true);
    registry.log(
        Some(SourceId::from("doc2")),
        LogEntry::text(LogLevel::Info, "background"),
    );
    status.process(None);

    let span = StatusIndicatorView::from_state(&status).render();

    assert_eq!(span.content, "[LOG 1] ");
    assert_eq!(span.style.bg, Some(Color::Yellow));
}

#[test]
fn from_state_without_flash_is_plain_yellow() {
    let mut registry = LoggerRegistry::new(10);
    let mut status = StatusIndicator::new(&mut registry, false);
    registry.log(
        Some(SourceId::from("doc2")),
        LogEntry::text(LogLevel::Info, "background"),
    );
    status.process(None);

    let span = StatusIndicatorView::from_state(&status).render();

    assert_eq!(span.style, Style::default().fg(Color::Yellow));
}
