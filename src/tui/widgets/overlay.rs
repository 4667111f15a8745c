use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::journal::submission::{INCOMPLETE_MESSAGE, SUCCESS_MESSAGE};
use crate::tui::app::Flashes;
use crate::tui::widgets::color::Palette;

/// Centered popup for the submit outcome. Both messages show if both flags
/// are up.
pub fn render_overlay(f: &mut Frame, area: Rect, flashes: &Flashes, dismiss_key: &str, palette: &Palette) {
    if !flashes.any_visible() {
        return;
    }

    let popup_area = popup_area(area, 60, 30);
    f.render_widget(Clear, popup_area);

    let text_style = palette.base().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    if flashes.submitted.is_visible() {
        lines.push(Line::from(Span::styled(SUCCESS_MESSAGE, text_style)));
        lines.push(Line::from(""));
    }
    if flashes.incomplete.is_visible() {
        lines.push(Line::from(Span::styled(INCOMPLETE_MESSAGE, text_style)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!("{} to close", dismiss_key),
        Style::default().fg(palette.muted),
    )));

    let border_style = if flashes.incomplete.is_visible() {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.fg)
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(palette.base()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

/// Centered rect using a percentage of the available area
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
