//! Screen layout: tab bar, document area with the viewer panel, status bar.

use super::log_view::LogView;
use super::status_indicator::StatusIndicatorView;
use super::tabs::{render_tab_bar, tab_title};
use crate::commands::Command;
use crate::host::{InsertMode, Shell};
use crate::model::key_label;
use crate::shell::{document_source, DocumentShell, Focus};
use crate::workbench::Workbench;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the whole screen.
pub fn render_layout(
    frame: &mut Frame,
    workbench: &Workbench,
    shell: &DocumentShell,
    scroll_offset: usize,
) {
    // Split screen vertically: tab bar + body + status bar
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar (border + titles)
            Constraint::Min(0),    // Document and viewer
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let titles = shell
        .tabs()
        .iter()
        .map(|w| tab_title(w, workbench.status().is_dirty(&document_source(w))))
        .collect();
    let selected = match shell.focus() {
        Focus::Tab(i) => Some(i),
        Focus::Nothing | Focus::Viewer => None,
    };
    render_tab_bar(frame, vertical_chunks[0], titles, selected);

    render_body(frame, vertical_chunks[1], workbench, shell, scroll_offset);
    render_status_bar(frame, vertical_chunks[2], workbench);
}

fn render_body(
    frame: &mut Frame,
    area: Rect,
    workbench: &Workbench,
    shell: &DocumentShell,
    scroll_offset: usize,
) {
    let panel = shell
        .viewer_panel()
        .filter(|_| shell.is_viewer_visible() && workbench.viewer().is_some());
    let Some(panel) = panel else {
        render_document(frame, area, shell);
        return;
    };

    let (document_area, viewer_area) = match panel.placement.mode {
        InsertMode::TabAfter => (None, area),
        InsertMode::SplitBottom | InsertMode::SplitRight => {
            let direction = if panel.placement.mode == InsertMode::SplitBottom {
                Direction::Vertical
            } else {
                Direction::Horizontal
            };
            let chunks = Layout::default()
                .direction(direction)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            (Some(chunks[0]), chunks[1])
        }
    };

    if let Some(document_area) = document_area {
        render_document(frame, document_area, shell);
    }
    if let Some(viewer) = workbench.viewer() {
        let view = LogView::new(
            viewer.lines(),
            viewer.current_source(),
            scroll_offset,
            shell.focus() == Focus::Viewer,
        );
        frame.render_widget(view, viewer_area);
    }
}

/// Placeholder content of the focused document.
fn render_document(frame: &mut Frame, area: Rect, shell: &DocumentShell) {
    let focused = match shell.focus() {
        Focus::Tab(i) => shell.tabs().get(i),
        Focus::Nothing | Focus::Viewer => None,
    };
    let (title, body) = match focused {
        Some(widget) => {
            let source = document_source(widget);
            let body = match &source {
                Some(_) => format!("Document {}", key_label(&source)),
                None => format!("{} (no log source)", widget),
            };
            (format!(" {} ", widget), body)
        }
        None => (" Workbench ".to_string(), "Nothing focused".to_string()),
    };

    let paragraph = Paragraph::new(vec![
        Line::from(body),
        Line::from(""),
        Line::styled(
            "Tab/[/]: switch document | l: toggle log | v: focus log | s: status",
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

/// Keyboard hints for the status bar; source commands only when enabled.
pub fn build_keyboard_hints(workbench: &Workbench) -> String {
    let mut hints = vec!["q: quit", "l: log"];
    if workbench.is_enabled(Command::AddCheckpoint) {
        hints.push("m: checkpoint");
    }
    if workbench.is_enabled(Command::ClearLog) {
        hints.push("c: clear");
    }
    hints.push("r: reload");
    hints.join(" | ")
}

/// Render the status bar with the log indicator and hints.
fn render_status_bar(frame: &mut Frame, area: Rect, workbench: &Workbench) {
    let mut spans = vec![StatusIndicatorView::from_state(workbench.status()).render()];
    spans.push(Span::styled(
        build_keyboard_hints(workbench),
        Style::default().fg(Color::Gray),
    ));
    if workbench.settings_error().is_some() {
        spans.push(Span::styled(
            " | settings not loaded, using previous values",
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
