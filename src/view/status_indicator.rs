//! Log status indicator widget for the status bar.
//!
//! Displays unseen log activity:
//! - Gray when every source has been seen
//! - Yellow with the unseen count while sources are dirty
//! - Highlighted on the blink phase of a flash

use crate::state::StatusIndicator;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Text content for the indicator.
const STATUS_INDICATOR_LABEL: &str = "LOG";

/// Status indicator widget that renders based on unseen counts and blink state.
///
/// # Design
///
/// This widget is pure and stateless. The blink phase is passed in rather
/// than managed internally; [`StatusIndicator::tick`] drives it from the
/// application timer.
///
/// # Examples
///
/// ```rust
/// use sourcelog::view::status_indicator::StatusIndicatorView;
///
/// // Nothing unseen - gray
/// let idle = StatusIndicatorView::new(0, false);
///
/// // Three unseen mutations, flash currently on
/// let flashing = StatusIndicatorView::new(3, true);
/// ```
#[derive(Debug, Clone)]
pub struct StatusIndicatorView {
    unseen: usize,
    blink_on: bool,
}

impl StatusIndicatorView {
    /// Create a new view for `unseen` mutations and the current blink phase.
    pub fn new(unseen: usize, blink_on: bool) -> Self {
        Self { unseen, blink_on }
    }

    /// View of the indicator state.
    pub fn from_state(status: &StatusIndicator) -> Self {
        Self::new(status.unseen_total(), status.blink_on())
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// - nothing unseen → Gray `[LOG] `
    /// - unseen, blink off → Yellow `[LOG n] `
    /// - blink on → Black on yellow, bold
    pub fn render(&self) -> Span<'static> {
        let text = if self.unseen == 0 {
            format!("[{STATUS_INDICATOR_LABEL}] ")
        } else {
            format!("[{STATUS_INDICATOR_LABEL} {}] ", self.unseen)
        };

        let style = if self.blink_on {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if self.unseen > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };

        Span::styled(text, style)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "status_indicator_tests.rs"]
mod tests;
