use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::widgets::color::Palette;

const SEPARATOR: &str = " • ";

/// One-line bar: a status message if present, otherwise as many key hints
/// as fit
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    palette: &Palette,
) {
    let max_width = area.width as usize;
    let (content, style) = match message {
        Some(msg) => (
            truncate(msg, max_width),
            palette.selected().add_modifier(Modifier::BOLD),
        ),
        None => (
            fit_hints(key_hints, max_width),
            Style::default().fg(palette.muted).bg(palette.bg),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Join hints with separators, stopping before the width is exceeded
pub fn fit_hints(hints: &[String], max_width: usize) -> String {
    let mut out = String::new();
    for hint in hints {
        let extra = if out.is_empty() {
            hint.chars().count()
        } else {
            SEPARATOR.chars().count() + hint.chars().count()
        };
        if out.chars().count() + extra > max_width {
            if out.is_empty() {
                return truncate(hint, max_width);
            }
            break;
        }
        if !out.is_empty() {
            out.push_str(SEPARATOR);
        }
        out.push_str(hint);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_stop_at_width() {
        let hints = vec!["Ctrl+s submit".to_string(), "Tab next".to_string()];
        assert_eq!(fit_hints(&hints, 80), "Ctrl+s submit • Tab next");
        assert_eq!(fit_hints(&hints, 20), "Ctrl+s submit");
        assert_eq!(fit_hints(&hints, 8), "Ctrl+...");
    }
}
