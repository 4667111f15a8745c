use ratatui::layout::{Constraint, Layout as RatLayout, Rect};

use crate::models::{Field, JournalMode};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub quote_area: Rect,
    pub heading_area: Rect,
    pub form_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Height: 2 borders + 3 quote + 2 heading + 4 prompts of 3 lines + 1 status
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 20;

    /// Rating row: border + digits + border
    const RATING_HEIGHT: u16 = 3;

    pub fn calculate(size: Rect) -> Self {
        let width = size.width.max(Self::MIN_WIDTH);
        let height = size.height.max(Self::MIN_HEIGHT);
        let size = Rect::new(size.x, size.y, width, height);

        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let [quote_area, heading_area, form_area, status_area] = RatLayout::vertical([
            Constraint::Length(3), // Quote and author
            Constraint::Length(2), // Mode title plus morning-done note
            Constraint::Min(3),    // Prompts
            Constraint::Length(1), // Status
        ])
        .areas(inner_area);

        Self {
            inner_area,
            quote_area,
            heading_area,
            form_area,
            status_area,
        }
    }

    /// One area per field of `mode`, in display order
    pub fn field_areas(&self, mode: JournalMode) -> Vec<(Field, Rect)> {
        let fields = mode.fields();
        let constraints: Vec<Constraint> = fields
            .iter()
            .map(|field| match field {
                Field::Rating => Constraint::Length(Self::RATING_HEIGHT),
                _ => Constraint::Fill(1),
            })
            .collect();

        let areas = RatLayout::vertical(constraints).split(self.form_area);
        fields.iter().copied().zip(areas.iter().copied()).collect()
    }
}
