//! Turning log entries into styled lines.
//!
//! Plain text entries are formatted here directly. Rendered-MIME entries go
//! through a [`ContentRenderer`], the opaque capability the host provides for
//! rich content. [`MimeRenderer`] is the built-in one.

use crate::model::{LogEntry, LogLevel, Payload, CHECKPOINT_MIME};
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use tui_markdown::from_str;

/// Renders rich (`RenderedMime`) entry payloads.
pub trait ContentRenderer {
    /// Produce display lines for a `mime_type` payload. Implementations must
    /// be pure: the same input always yields the same lines.
    fn render_mime(&self, mime_type: &str, data: &str) -> Vec<Line<'static>>;
}

/// Built-in renderer for the MIME types the workbench emits itself.
///
/// - `text/plain`: verbatim, one line per input line
/// - `text/markdown`: styled through `tui-markdown`
/// - `application/json`: pretty printed
/// - checkpoint markers: a horizontal rule with the time
/// - anything else: a one-line placeholder naming the type
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeRenderer;

impl ContentRenderer for MimeRenderer {
    fn render_mime(&self, mime_type: &str, data: &str) -> Vec<Line<'static>> {
        match mime_type {
            "text/plain" => data.lines().map(|l| Line::from(l.to_string())).collect(),
            "text/markdown" => render_markdown(data),
            "application/json" => render_json(data),
            CHECKPOINT_MIME => vec![render_checkpoint(data)],
            other => vec![Line::from(Span::styled(
                format!("[{} content, {} bytes]", other, data.len()),
                Style::default().add_modifier(Modifier::ITALIC),
            ))],
        }
    }
}

/// Render a full entry: a header line with time and level, followed by the
/// body. Plain text bodies share the header line.
pub fn render_entry(entry: &LogEntry, renderer: &dyn ContentRenderer) -> Vec<Line<'static>> {
    let header = vec![
        Span::styled(
            format_timestamp(&entry.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        Span::styled(level_tag(entry.level), style_for_level(entry.level)),
        Span::raw(" "),
    ];

    match &entry.payload {
        Payload::Text(text) => {
            let mut lines = text.lines();
            let mut first = header;
            first.push(Span::raw(lines.next().unwrap_or_default().to_string()));
            let mut out = vec![Line::from(first)];
            out.extend(lines.map(|l| Line::from(format!("    {}", l))));
            out
        }
        Payload::Mime { mime_type, data } => {
            let body = renderer.render_mime(mime_type, data);
            if mime_type == CHECKPOINT_MIME {
                return body;
            }
            let mut out = vec![Line::from(header)];
            out.extend(body);
            out
        }
    }
}

/// Get the style for a log level.
///
/// - Error: Red
/// - Warning: Yellow
/// - Info: Cyan
/// - Debug: DarkGray
/// - Unset: default
pub fn style_for_level(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red),
        LogLevel::Warning => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Cyan),
        LogLevel::Debug => Style::default().fg(Color::DarkGray),
        LogLevel::Unset => Style::default(),
    }
}

/// Fixed-width level tag.
fn level_tag(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO ",
        LogLevel::Warning => "WARN ",
        LogLevel::Error => "ERROR",
        LogLevel::Unset => "     ",
    }
}

/// Format timestamp as HH:MM:SS.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

fn render_markdown(markdown: &str) -> Vec<Line<'static>> {
    let text = from_str(markdown);

    text.lines
        .into_iter()
        .map(|line| {
            let owned_spans: Vec<_> = line
                .spans
                .into_iter()
                .map(|span| Span {
                    content: span.content.into_owned().into(),
                    style: span.style,
                })
                .collect();
            Line::from(owned_spans)
        })
        .collect()
}

fn render_json(data: &str) -> Vec<Line<'static>> {
    let pretty = serde_json::from_str::<serde_json::Value>(data)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| data.to_string());
    pretty.lines().map(|l| Line::from(l.to_string())).collect()
}

fn render_checkpoint(data: &str) -> Line<'static> {
    let label = DateTime::parse_from_rfc3339(data)
        .map(|at| at.with_timezone(&Utc).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| data.to_string());
    Line::from(Span::styled(
        format!("──── checkpoint {} ────", label),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
}
