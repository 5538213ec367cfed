//! Document tab bar.

use crate::model::{key_label, WidgetId};
use crate::shell::document_source;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Marker appended to the title of a document with unseen log activity.
pub const DIRTY_MARKER: &str = " ●";

/// Tab title for `widget`: the document's source, or the raw widget id.
pub fn tab_title(widget: &WidgetId, dirty: bool) -> Line<'static> {
    let source = document_source(widget);
    let name = match &source {
        Some(_) => key_label(&source).to_string(),
        None => widget.as_str().to_string(),
    };
    if dirty {
        Line::from(vec![
            Span::raw(name),
            Span::styled(DIRTY_MARKER, Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(name)
    }
}

/// Render the document tab bar.
///
/// # Arguments
/// * `titles` - Tab titles in display order
/// * `selected_tab` - Index of the focused tab, `None` if focus is elsewhere
pub fn render_tab_bar(
    frame: &mut Frame,
    area: Rect,
    titles: Vec<Line<'static>>,
    selected_tab: Option<usize>,
) {
    // Validate bounds: treat out-of-bounds as None
    let validated_selection = selected_tab.filter(|&idx| idx < titles.len());

    let mut tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Documents"))
        .style(Style::default().fg(Color::White));

    // Tabs has no "no selection" state: only highlight when something is selected
    if let Some(idx) = validated_selection {
        tabs = tabs
            .highlight_style(Style::default().fg(Color::Yellow))
            .select(idx);
    }

    frame.render_widget(tabs, area);
}
