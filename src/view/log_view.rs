//! Log viewer widget: the rendered lines of the displayed source.

use crate::model::SourceId;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Title prefix of the viewer panel.
const LOG_VIEW_TITLE: &str = "Log Console";

/// Log viewer widget.
///
/// Shows the tail of the displayed source's rendered lines:
/// - Border title with the source name, or "(no source)" when unbound
/// - Placeholder text for an empty log or an unbound viewer
/// - Yellow border when focused, white otherwise
pub struct LogView<'a> {
    /// Rendered lines, oldest first
    lines: &'a [Line<'static>],
    source: Option<&'a SourceId>,
    /// Lines scrolled up from the bottom (0 = newest visible)
    scroll_offset: usize,
    focused: bool,
}

impl<'a> LogView<'a> {
    /// Create a new LogView widget.
    ///
    /// # Arguments
    /// * `lines` - Rendered lines, oldest first
    /// * `source` - Displayed source, `None` when unbound
    /// * `scroll_offset` - Lines scrolled up from the newest
    /// * `focused` - Whether the viewer has focus
    pub fn new(
        lines: &'a [Line<'static>],
        source: Option<&'a SourceId>,
        scroll_offset: usize,
        focused: bool,
    ) -> Self {
        Self {
            lines,
            source,
            scroll_offset,
            focused,
        }
    }

    fn title(&self) -> String {
        match self.source {
            Some(source) => format!(" {LOG_VIEW_TITLE}: {source} "),
            None => format!(" {LOG_VIEW_TITLE} (no source) "),
        }
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        let placeholder = if self.source.is_none() {
            Some("No source selected.")
        } else if self.lines.is_empty() {
            Some("No log messages.")
        } else {
            None
        };
        if let Some(text) = placeholder {
            Paragraph::new(Line::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(inner, buf);
            return;
        }

        let (start, end) = visible_window(
            self.lines.len(),
            usize::from(inner.height),
            self.scroll_offset,
        );
        Paragraph::new(self.lines[start..end].to_vec()).render(inner, buf);
    }
}

/// Range of lines that fits `height` rows when scrolled `offset` lines up
/// from the bottom. The offset is clamped so the first line is reachable.
pub fn visible_window(len: usize, height: usize, offset: usize) -> (usize, usize) {
    let max_offset = len.saturating_sub(height);
    let end = len - offset.min(max_offset);
    (end.saturating_sub(height), end)
}
