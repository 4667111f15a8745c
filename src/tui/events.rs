use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

use crate::models::{Field, Rating};
use crate::tui::App;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::has_primary_modifier;

/// How long to wait for input before running timers again
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Guard that ensures terminal state is restored even on panic
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Restore terminal state on normal exit; the drop becomes a no-op
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already on a cleanup path, errors are ignored
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Checked before entering the alternate screen so the message is readable
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width,
            height,
            Layout::MIN_WIDTH,
            Layout::MIN_HEIGHT
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.tick(Instant::now());

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(terminal_rect);
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(POLL_TIMEOUT)? {
            // Only Press events, Windows also reports releases
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press
                    && handle_key_event(&mut app, key_event, Instant::now())?
                {
                    break;
                }
            }
        }
    }

    info!("Journal closed");
    guard.restore()?;
    Ok(())
}

/// Apply one key press. Returns true when the user asked to quit.
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> Result<bool, TuiError> {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || app.keys.quit.matches(&key) {
        return Ok(true);
    }

    // The overlay is modal: only dismiss gets through
    if app.flashes.any_visible() {
        if app.keys.dismiss.matches(&key) || key.code == KeyCode::Enter {
            app.dismiss_flashes();
        }
        return Ok(false);
    }

    if app.keys.submit.matches(&key) {
        app.submit(now);
        return Ok(false);
    }
    if app.keys.next_field.matches(&key) {
        app.focus_next();
        return Ok(false);
    }
    if app.keys.prev_field.matches(&key) {
        app.focus_prev();
        return Ok(false);
    }

    if app.focused_field() == Field::Rating {
        handle_rating_key(app, key);
    } else {
        handle_text_key(app, key);
    }
    Ok(false)
}

fn handle_rating_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.set_rating(Rating::step_down(app.rating)),
        KeyCode::Right => app.set_rating(Rating::step_up(app.rating)),
        KeyCode::Char(c) => {
            if let Some(rating) = c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .and_then(Rating::new)
            {
                app.set_rating(rating);
            }
        }
        KeyCode::Down | KeyCode::Enter => app.focus_next(),
        KeyCode::Up => app.focus_prev(),
        _ => {}
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !has_primary_modifier(key.modifiers) => {
            app.edit_focused(|editor| editor.insert_char(c));
        }
        KeyCode::Enter => app.edit_focused(|editor| editor.insert_newline()),
        KeyCode::Backspace => app.edit_focused(|editor| editor.delete_char()),
        KeyCode::Delete => app.edit_focused(|editor| editor.delete_forward()),
        KeyCode::Left => app.edit_focused(|editor| editor.move_cursor_left()),
        KeyCode::Right => app.edit_focused(|editor| editor.move_cursor_right()),
        KeyCode::Up => app.edit_focused(|editor| editor.move_cursor_up()),
        KeyCode::Down => app.edit_focused(|editor| editor.move_cursor_down()),
        KeyCode::Home => app.edit_focused(|editor| editor.move_cursor_home()),
        KeyCode::End => app.edit_focused(|editor| editor.move_cursor_end()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::QuoteState;
    use crate::journal::daytime::test_clock::FixedClock;
    use crate::models::JournalMode;
    use crate::{Config, Database};

    fn app_at(hour: u32) -> App {
        App::new(
            Config::default(),
            Database::open_in_memory().unwrap(),
            Box::new(FixedClock::at(hour)),
            QuoteState::disabled(),
            Instant::now(),
        )
        .unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now()).unwrap()
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), Instant::now())
            .unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_goes_to_focused_prompt() {
        let mut app = app_at(8);
        type_text(&mut app, "tea");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "run");
        let draft = app.draft();
        assert_eq!(draft.grateful, "tea");
        assert_eq!(draft.today, "run");
    }

    #[test]
    fn ctrl_s_submits_instead_of_typing() {
        let mut app = app_at(8);
        assert!(!ctrl(&mut app, 's'));
        assert!(app.flashes.incomplete.is_visible());
        assert!(app.draft().grateful.is_empty());
    }

    #[test]
    fn overlay_swallows_keys_until_dismissed() {
        let mut app = app_at(8);
        ctrl(&mut app, 's');
        type_text(&mut app, "x");
        assert!(app.draft().grateful.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(!app.flashes.any_visible());
        type_text(&mut app, "x");
        assert_eq!(app.draft().grateful, "x");
    }

    #[test]
    fn full_morning_via_keys() {
        let mut app = app_at(8);
        for text in ["tea", "run", "calm", "listen"] {
            type_text(&mut app, text);
            press(&mut app, KeyCode::Tab);
        }
        ctrl(&mut app, 's');
        assert!(app.flashes.submitted.is_visible());
        assert!(app.draft().intention.is_empty());
    }

    #[test]
    fn rating_keys_select_and_step() {
        let mut app = app_at(20);
        assert_eq!(app.mode(), JournalMode::Night);
        type_text(&mut app, "4");
        assert_eq!(app.rating, Rating::new(4));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.rating, Rating::new(5));
        type_text(&mut app, "9");
        assert_eq!(app.rating, Rating::new(5));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.rating, Rating::new(4));
    }

    #[test]
    fn quit_bindings() {
        let mut app = app_at(8);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(ctrl(&mut app, 'q'));
        assert!(ctrl(&mut app, 'c'));
    }
}
