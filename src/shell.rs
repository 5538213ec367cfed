//! In-memory workbench shell: a row of document tabs plus one viewer panel.
//!
//! Backs the terminal UI and doubles as the shell for scenario tests. Widget
//! ids of documents carry their source as `doc:<source>`; any other widget has
//! no source.

use crate::host::{InsertMode, Placement, Shell, VIEWER_WIDGET_ID};
use crate::model::{SourceId, WidgetId};

/// Widget-id prefix of document tabs.
pub const DOCUMENT_PREFIX: &str = "doc:";

/// Widget id of the document tab for `source`.
pub fn document_widget(source: &str) -> WidgetId {
    WidgetId::new(format!("{DOCUMENT_PREFIX}{source}"))
}

/// Source context of a [`DocumentShell`]: documents map to their source.
pub fn document_source(widget: &WidgetId) -> Option<SourceId> {
    widget
        .as_str()
        .strip_prefix(DOCUMENT_PREFIX)
        .map(SourceId::from)
}

/// Which widget holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Nothing is focused.
    Nothing,
    /// The tab at this index.
    Tab(usize),
    /// The viewer panel.
    Viewer,
}

/// The viewer panel as placed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerPanel {
    /// Where the panel was inserted.
    pub placement: Placement,
    /// Collapsed panels stay open but are off screen.
    pub collapsed: bool,
}

/// A shell with document tabs and at most one viewer panel.
#[derive(Debug, Clone)]
pub struct DocumentShell {
    tabs: Vec<WidgetId>,
    focus: Focus,
    viewer: Option<ViewerPanel>,
    insert_count: usize,
}

impl DocumentShell {
    /// Shell with `tabs`, focusing the first one.
    pub fn new(tabs: impl IntoIterator<Item = WidgetId>) -> Self {
        let tabs: Vec<WidgetId> = tabs.into_iter().collect();
        let focus = if tabs.is_empty() {
            Focus::Nothing
        } else {
            Focus::Tab(0)
        };
        Self {
            tabs,
            focus,
            viewer: None,
            insert_count: 0,
        }
    }

    /// Shell with one document tab per source name.
    pub fn with_documents<'a>(sources: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(sources.into_iter().map(document_widget))
    }

    /// Tabs in display order.
    pub fn tabs(&self) -> &[WidgetId] {
        &self.tabs
    }

    /// Current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Focus the tab at `index`. Out-of-range indices are ignored.
    pub fn focus_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.focus = Focus::Tab(index);
        }
    }

    /// Focus the tab showing `widget`, if present.
    pub fn focus_widget(&mut self, widget: &WidgetId) {
        if let Some(index) = self.tabs.iter().position(|w| w == widget) {
            self.focus = Focus::Tab(index);
        }
    }

    /// Focus the next tab, wrapping around. From the viewer this returns to
    /// the first tab.
    pub fn focus_next(&mut self) {
        self.cycle(1);
    }

    /// Focus the previous tab, wrapping around.
    pub fn focus_prev(&mut self) {
        self.cycle(self.tabs.len().saturating_sub(1));
    }

    /// Drop focus entirely.
    pub fn blur(&mut self) {
        self.focus = Focus::Nothing;
    }

    /// Add a tab and return its index.
    pub fn push_tab(&mut self, widget: WidgetId) -> usize {
        self.tabs.push(widget);
        self.tabs.len() - 1
    }

    /// The viewer panel, if open.
    pub fn viewer_panel(&self) -> Option<&ViewerPanel> {
        self.viewer.as_ref()
    }

    /// Collapse or expand the open viewer panel.
    pub fn set_viewer_collapsed(&mut self, collapsed: bool) {
        if let Some(panel) = self.viewer.as_mut() {
            panel.collapsed = collapsed;
        }
    }

    /// How many times a viewer panel was inserted.
    pub fn insert_count(&self) -> usize {
        self.insert_count
    }

    fn cycle(&mut self, step: usize) {
        if self.tabs.is_empty() {
            self.focus = Focus::Nothing;
            return;
        }
        let next = match self.focus {
            Focus::Tab(i) => (i + step) % self.tabs.len(),
            Focus::Nothing | Focus::Viewer => 0,
        };
        self.focus = Focus::Tab(next);
    }
}

impl Shell for DocumentShell {
    fn focused_widget(&self) -> Option<WidgetId> {
        match self.focus {
            Focus::Nothing => None,
            Focus::Tab(i) => self.tabs.get(i).cloned(),
            Focus::Viewer => Some(WidgetId::new(VIEWER_WIDGET_ID)),
        }
    }

    fn insert_viewer(&mut self, placement: Placement) {
        self.insert_count += 1;
        self.viewer = Some(ViewerPanel {
            placement,
            collapsed: false,
        });
    }

    fn activate_viewer(&mut self) {
        if let Some(panel) = self.viewer.as_mut() {
            panel.collapsed = false;
            self.focus = Focus::Viewer;
        }
    }

    fn close_viewer(&mut self) {
        let Some(panel) = self.viewer.take() else {
            return;
        };
        if self.focus == Focus::Viewer {
            let anchor = panel
                .placement
                .anchor
                .and_then(|a| self.tabs.iter().position(|w| *w == a));
            self.focus = match anchor {
                Some(i) => Focus::Tab(i),
                None if self.tabs.is_empty() => Focus::Nothing,
                None => Focus::Tab(0),
            };
        }
    }

    fn is_viewer_visible(&self) -> bool {
        match &self.viewer {
            None => false,
            Some(panel) if panel.collapsed => false,
            Some(panel) => {
                panel.placement.mode != InsertMode::TabAfter || self.focus == Focus::Viewer
            }
        }
    }
}
