//! Row rendering using ratatui Line/Span styling.

use crate::summary::{RowKind, SummaryRow};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Configuration for the rendering pipeline.
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
}

const DIR_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
const FILE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::DarkGray);
const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Sanitize control characters to avoid terminal control-sequence injection.
///
/// Every builder in this module runs user-controlled text (file names, paths,
/// OS error messages) through here, including `row_to_plain_text` for
/// `--print`. It is public so the escaping rules can be checked on their own
/// and reused by anything else that writes such text to a terminal.
///
/// Newline, carriage return and tab become `\n`, `\r`, `\t`. Other control
/// characters become `\xNN` (up to U+00FF) or `\u{N}`.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Convert rows into styled lines; `cursor` marks the highlighted row.
pub fn rows_to_lines(
    rows: &[SummaryRow],
    config: &RenderConfig,
    cursor: Option<usize>,
) -> Vec<Line<'static>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| row_to_line(row, config, cursor == Some(i)))
        .collect()
}

/// Convert a single row into a styled `Line`.
fn row_to_line(row: &SummaryRow, config: &RenderConfig, is_cursor: bool) -> Line<'static> {
    let mut spans = Vec::new();
    let label = sanitize_terminal_text(&row.label);

    let label_style = match row.kind {
        RowKind::Directory => DIR_STYLE,
        RowKind::File => FILE_STYLE,
        RowKind::Error => ERROR_STYLE,
        RowKind::Info => Style::new(),
    };

    if config.use_color {
        spans.push(Span::styled(label, label_style));
    } else {
        spans.push(Span::raw(label));
    }

    if let Some(ref desc) = row.description {
        let text = format!("  {}", sanitize_terminal_text(desc));
        if config.use_color {
            spans.push(Span::styled(text, DESCRIPTION_STYLE));
        } else {
            spans.push(Span::raw(text));
        }
    }

    let line = Line::from(spans);
    if is_cursor {
        line.patch_style(CURSOR_STYLE)
    } else {
        line
    }
}

/// Plain-text form of a row, as printed by `--print`.
pub fn row_to_plain_text(row: &SummaryRow) -> String {
    let label = sanitize_terminal_text(&row.label);
    match row.description {
        Some(ref desc) => format!("{}  ({})", label, sanitize_terminal_text(desc)),
        None => label,
    }
}

/// Build a styled status bar `Line`.
///
/// `focus` is the full path of the highlighted row, if any; `message`
/// overrides the refresh time when set.
pub fn status_bar_line(
    focus: Option<&str>,
    row_count: usize,
    last_refresh: Option<&str>,
    message: Option<&str>,
) -> Line<'static> {
    let focus_text = match focus {
        Some(p) => sanitize_terminal_text(p),
        None => "(no path)".to_string(),
    };
    let tail = match (message, last_refresh) {
        (Some(m), _) => sanitize_terminal_text(m),
        (None, Some(ts)) => format!("Refreshed: {}", sanitize_terminal_text(ts)),
        (None, None) => "Not refreshed yet".to_string(),
    };

    let text = format!(" {}  |  {} rows  |  {}", focus_text, row_count, tail);

    let style = Style::new()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    Line::from(Span::styled(text, style))
}

/// Build the path prompt `Line` shown while picking a path.
pub fn prompt_line(input: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(" Open: ", Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(sanitize_terminal_text(input)),
        Span::styled("_", Style::new().add_modifier(Modifier::SLOW_BLINK)),
    ])
}

/// Build a help bar `Line` showing available keyboard shortcuts.
pub fn help_bar_line() -> Line<'static> {
    let text = " q: Quit  |  o: Open path  |  c: Clear  |  r: Refresh  |  ↑↓/jk: Move  |  g: Greet";
    let style = Style::new().fg(Color::DarkGray);
    Line::from(Span::styled(text.to_string(), style))
}

/// Extract plain text from a `Line` (useful for testing).
pub fn line_to_plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dir_row() -> SummaryRow {
        SummaryRow {
            label: "Directory: src".to_string(),
            description: Some("/tmp/src".to_string()),
            path: Some(PathBuf::from("/tmp/src")),
            kind: RowKind::Directory,
        }
    }

    #[test]
    fn directory_row_uses_dir_style() {
        let cfg = RenderConfig { use_color: true };
        let line = row_to_line(&dir_row(), &cfg, false);
        assert_eq!(line.spans[0].style, DIR_STYLE);
        assert_eq!(line.spans[1].style, DESCRIPTION_STYLE);
        assert_eq!(line_to_plain_text(&line), "Directory: src  /tmp/src");
    }

    #[test]
    fn no_color_emits_raw_spans() {
        let cfg = RenderConfig { use_color: false };
        let line = row_to_line(&SummaryRow::error("Error reading file info"), &cfg, false);
        assert_eq!(line.spans[0].style, Style::default());
    }

    #[test]
    fn cursor_row_is_reversed() {
        let cfg = RenderConfig { use_color: false };
        let lines = rows_to_lines(&[SummaryRow::info("a"), SummaryRow::info("b")], &cfg, Some(1));
        assert!(lines[1].style.add_modifier.contains(Modifier::REVERSED));
        assert!(!lines[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn plain_text_includes_description() {
        assert_eq!(row_to_plain_text(&dir_row()), "Directory: src  (/tmp/src)");
        assert_eq!(row_to_plain_text(&SummaryRow::info("Items: 3")), "Items: 3");
    }

    #[test]
    fn status_bar_message_wins() {
        let line = status_bar_line(Some("/tmp"), 4, Some("12:00:00"), Some("Hello"));
        let text = line_to_plain_text(&line);
        assert!(text.contains("/tmp"));
        assert!(text.contains("4 rows"));
        assert!(text.contains("Hello"));
        assert!(!text.contains("12:00:00"));
    }
}
