use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::{Field, JournalMode};
use crate::tui::widgets::{
    color::Palette, overlay::render_overlay, prompt_list::render_prompt_list,
    quote_banner::render_quote_banner, status_bar::render_status_bar,
};
use crate::tui::{App, Layout};
use crate::utils::format_key_binding_for_display;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let palette = Palette::from_theme(&app.config.get_active_theme());

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Diary", Style::default().add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(outer_block, f.area());

    render_quote_banner(f, layout.quote_area, &app.quote, app.frame_count, &palette);

    let mut heading = vec![Line::from(Span::styled(
        app.mode().title(),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ))];
    if app.mode() == JournalMode::Night && app.morning_done_today {
        heading.push(Line::from(Span::styled(
            "Morning journaling done today",
            Style::default().fg(palette.muted),
        )));
    }
    f.render_widget(
        Paragraph::new(heading).alignment(Alignment::Center).style(palette.base()),
        layout.heading_area,
    );

    render_prompt_list(f, layout, app, &palette);

    let hints = key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_deref(),
        &hints,
        &palette,
    );

    // Overlay last so it sits above the prompts
    let dismiss = format_key_binding_for_display(&app.config.key_bindings.dismiss);
    render_overlay(f, layout.inner_area, &app.flashes, &dismiss, &palette);
}

fn key_hints(app: &App) -> Vec<String> {
    let keys = &app.config.key_bindings;
    let show = format_key_binding_for_display;
    if app.flashes.any_visible() {
        return vec![
            format!("{} close", show(&keys.dismiss)),
            format!("{} quit", show(&keys.quit)),
        ];
    }

    let mut hints = vec![
        format!("{} submit", show(&keys.submit)),
        format!("{}/{} field", show(&keys.next_field), show(&keys.prev_field)),
    ];
    if app.focused_field() == Field::Rating {
        hints.push("1-5 or ←/→ rate".to_string());
    } else {
        hints.push("Enter new line".to_string());
    }
    hints.push(format!("{} quit", show(&keys.quit)));
    hints
}
