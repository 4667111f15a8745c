use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::Field;
use crate::tui::App;
use crate::tui::layout::Layout;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::editor::Editor;
use crate::tui::widgets::rating::render_rating;

/// Draw every prompt of the active mode. The focused text field gets the
/// terminal cursor unless an overlay is up.
pub fn render_prompt_list(f: &mut Frame, layout: &Layout, app: &mut App, palette: &Palette) {
    let focused = app.focused_field();
    let show_cursor = !app.flashes.any_visible();

    for (field, area) in layout.field_areas(app.mode()) {
        let is_focused = field == focused;
        if field == Field::Rating {
            render_rating(f, area, app.rating, is_focused, palette);
            continue;
        }
        if let Some(editor) = app.editors.get_mut(&field) {
            render_text_field(f, area, field, editor, is_focused && show_cursor, is_focused, palette);
        }
    }
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    field: Field,
    editor: &mut Editor,
    place_cursor: bool,
    focused: bool,
    palette: &Palette,
) {
    let border_style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.fg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(field.prompt())
        .border_style(border_style);
    let inner = block.inner(area);

    let height = inner.height as usize;
    let width = inner.width as usize;
    editor.update_scroll(height, width);

    let lines: Vec<Line> = if editor.is_empty() && !focused {
        vec![Line::styled("...", Style::default().fg(palette.muted))]
    } else {
        editor
            .visible_lines(height, width)
            .into_iter()
            .map(Line::from)
            .collect()
    };

    f.render_widget(Paragraph::new(lines).block(block).style(palette.base()), area);

    if place_cursor {
        if let Some((x, y)) = editor.cursor_screen_pos(inner) {
            f.set_cursor_position((x, y));
        }
    }
}
