//! Interfaces the workbench host provides to the log core.
//!
//! The core never inspects concrete widget types. It asks the shell which
//! widget is focused and asks a [`SourceContext`] which source, if any, that
//! widget belongs to.

use crate::model::{SourceId, WidgetId};
use serde::Deserialize;

/// Widget id the shell uses for the log viewer panel.
pub const VIEWER_WIDGET_ID: &str = "sourcelog-viewer";

/// How the viewer is inserted relative to its anchor widget.
///
/// Configured as `viewer_placement = "split-bottom" | "split-right" | "tab-after"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsertMode {
    /// Below the anchor, sharing its area.
    #[default]
    SplitBottom,
    /// To the right of the anchor.
    SplitRight,
    /// As a tab next to the anchor.
    TabAfter,
}

/// Where a newly opened viewer goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Widget the viewer is placed next to; `None` lets the shell choose.
    pub anchor: Option<WidgetId>,
    /// Placement relative to the anchor.
    pub mode: InsertMode,
}

/// Focus, placement and activation services of the workbench shell.
pub trait Shell {
    /// Widget that currently has focus.
    fn focused_widget(&self) -> Option<WidgetId>;

    /// Insert the viewer panel.
    fn insert_viewer(&mut self, placement: Placement);

    /// Bring the viewer panel to front and focus it.
    fn activate_viewer(&mut self);

    /// Remove the viewer panel.
    fn close_viewer(&mut self);

    /// Whether the viewer panel is currently on screen (frontmost in its area).
    fn is_viewer_visible(&self) -> bool;
}

/// Capability query mapping a widget to its log source.
pub trait SourceContext {
    /// Source the widget is associated with, or `None` if it has none.
    fn source_of(&self, widget: &WidgetId) -> Option<SourceId>;
}

impl<F> SourceContext for F
where
    F: Fn(&WidgetId) -> Option<SourceId>,
{
    fn source_of(&self, widget: &WidgetId) -> Option<SourceId> {
        self(widget)
    }
}

/// Whether `widget` is the viewer panel itself.
pub fn is_viewer(widget: &WidgetId) -> bool {
    widget.as_str() == VIEWER_WIDGET_ID
}
