use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::{Field, Rating};
use crate::tui::widgets::color::Palette;

/// The 1-5 selector: the chosen number is drawn highlighted
pub fn render_rating(
    f: &mut Frame,
    area: Rect,
    rating: Option<Rating>,
    focused: bool,
    palette: &Palette,
) {
    let mut spans = Vec::new();
    for value in Rating::all() {
        let style = if rating == Some(value) {
            palette.selected()
        } else {
            palette.base()
        };
        spans.push(Span::styled(format!(" {} ", value.value()), style));
        spans.push(Span::raw("  "));
    }
    spans.pop();

    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.fg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Field::Rating.prompt())
        .title_alignment(Alignment::Center)
        .border_style(border_style);

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(paragraph, area);
}
