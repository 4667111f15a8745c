use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::journal::QuoteState;
use crate::tui::widgets::color::Palette;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Quote of the day, a spinner while it loads, or nothing if it failed
pub fn render_quote_banner(
    f: &mut Frame,
    area: Rect,
    quote: &QuoteState,
    frame_count: u64,
    palette: &Palette,
) {
    let lines = if quote.loading {
        // Spinner advances every few frames
        let glyph = SPINNER[(frame_count / 4 % SPINNER.len() as u64) as usize];
        vec![Line::from(Span::styled(
            format!("{} Loading quote...", glyph),
            Style::default().fg(palette.muted),
        ))]
    } else if let Some(ref q) = quote.quote {
        let style = Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC);
        vec![
            Line::from(Span::styled(q.text.clone(), style)),
            Line::from(Span::styled(q.author.clone(), style)),
        ]
    } else {
        Vec::new()
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(palette.base());
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::models::Quote;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(quote: &QuoteState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        let palette = Palette::from_theme(&Theme::default());
        terminal
            .draw(|f| render_quote_banner(f, f.area(), quote, 0, &palette))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn loading_shows_spinner_text() {
        let mut state = QuoteState::disabled();
        state.loading = true;
        assert!(rendered(&state).contains("Loading quote..."));
    }

    #[test]
    fn failed_fetch_renders_nothing() {
        let state = QuoteState::disabled();
        assert!(rendered(&state).trim().is_empty());
    }

    #[test]
    fn loaded_quote_shows_text_and_author() {
        let mut state = QuoteState::disabled();
        state.quote = Some(Quote {
            text: "Begin anywhere.".to_string(),
            author: "John Cage".to_string(),
        });
        let screen = rendered(&state);
        assert!(screen.contains("Begin anywhere."));
        assert!(screen.contains("John Cage"));
    }
}
