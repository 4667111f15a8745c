use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::database::DatabaseError;
use crate::journal::{Clock, DaytimeSelector, Flash, QuoteState, validate};
use crate::models::{Draft, Field, JournalMode, Rating, SavedEntry};
use crate::tui::error::TuiError;
use crate::tui::widgets::editor::Editor;
use crate::utils::{ParsedKeyBinding, format_date, parse_key_binding};
use crate::{Config, Database};

/// Key bindings parsed from config
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: ParsedKeyBinding,
    pub submit: ParsedKeyBinding,
    pub next_field: ParsedKeyBinding,
    pub prev_field: ParsedKeyBinding,
    pub dismiss: ParsedKeyBinding,
}

impl KeyMap {
    pub fn from_config(config: &Config) -> Result<Self, TuiError> {
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        let keys = &config.key_bindings;
        Ok(Self {
            quit: parse(&keys.quit)?,
            submit: parse(&keys.submit)?,
            next_field: parse(&keys.next_field)?,
            prev_field: parse(&keys.prev_field)?,
            dismiss: parse(&keys.dismiss)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

/// Overlay flags raised by submit
#[derive(Debug, Clone, Default)]
pub struct Flashes {
    pub submitted: Flash,
    pub incomplete: Flash,
}

impl Flashes {
    pub fn any_visible(&self) -> bool {
        self.submitted.is_visible() || self.incomplete.is_visible()
    }
}

pub struct App {
    pub config: Config,
    pub database: Database,
    pub keys: KeyMap,
    clock: Box<dyn Clock>,

    pub editors: BTreeMap<Field, Editor>,
    pub rating: Option<Rating>,
    /// Index into the active mode's fields
    pub focus: usize,

    pub daytime: DaytimeSelector,
    pub quote: QuoteState,
    pub flashes: Flashes,
    pub status: StatusState,
    pub morning_done_today: bool,
    /// Local date `morning_done_today` was read for
    flag_date: NaiveDate,
    pub frame_count: u64,
}

impl App {
    /// Read the stored draft and evaluate the clock
    pub fn new(
        config: Config,
        database: Database,
        clock: Box<dyn Clock>,
        quote: QuoteState,
        now: Instant,
    ) -> Result<Self, TuiError> {
        let keys = KeyMap::from_config(&config)?;
        let window = config.night_window()?;
        let daytime = DaytimeSelector::new(window, clock.as_ref(), now);

        let draft = database.load_draft()?;
        let editors = Field::ALL
            .iter()
            .filter_map(|&field| draft.text(field).map(|text| (field, Editor::from_string(text))))
            .collect();
        let flag_date = clock.today();
        let morning_done_today = database.morning_completed_on(&format_date(flag_date))?;

        info!(mode = %daytime.mode(), "Journal opened");

        Ok(Self {
            config,
            database,
            keys,
            clock,
            editors,
            rating: draft.rating,
            focus: 0,
            daytime,
            quote,
            flashes: Flashes::default(),
            status: StatusState::default(),
            morning_done_today,
            flag_date,
            frame_count: 0,
        })
    }

    pub fn mode(&self) -> JournalMode {
        self.daytime.mode()
    }

    pub fn focused_field(&self) -> Field {
        let fields = self.mode().fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.mode().fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.mode().fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Current values of every field
    pub fn draft(&self) -> Draft {
        let mut draft = Draft {
            rating: self.rating,
            ..Draft::default()
        };
        for (&field, editor) in &self.editors {
            draft.set_text(field, editor.content());
        }
        draft
    }

    /// Apply an edit to the focused text field and persist the result
    pub fn edit_focused(&mut self, edit: impl FnOnce(&mut Editor)) {
        let field = self.focused_field();
        let Some(editor) = self.editors.get_mut(&field) else {
            return;
        };
        let before = editor.content();
        edit(editor);
        let after = editor.content();
        if before != after {
            let result = self.database.store_text(field, &after);
            self.report_store_result(result);
        }
    }

    pub fn set_rating(&mut self, rating: Rating) {
        if self.rating == Some(rating) {
            return;
        }
        self.rating = Some(rating);
        let result = self.database.store_rating(self.rating);
        self.report_store_result(result);
    }

    fn report_store_result(&mut self, result: Result<(), DatabaseError>) {
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist draft");
            self.set_status_message(format!("Failed to save draft: {}", e));
        }
    }

    /// Validate the active mode's fields. Complete entries are logged and
    /// their fields cleared; either way the matching flash is raised.
    pub fn submit(&mut self, now: Instant) {
        let mode = self.mode();
        let draft = self.draft();

        if let Err(incomplete) = validate(&draft, mode) {
            debug!(%mode, missing = ?incomplete.missing, "Submission incomplete");
            self.flashes.incomplete.raise(now);
            return;
        }

        let today = self.clock.today();
        let entry = SavedEntry::capture(format_date(today), mode, &draft);
        match self.database.record_submission(&entry) {
            Ok(id) => {
                info!(id, %mode, "Journal submitted");
                for &field in mode.fields() {
                    match self.editors.get_mut(&field) {
                        Some(editor) => editor.clear(),
                        None => self.rating = None,
                    }
                }
                if mode == JournalMode::Morning {
                    self.morning_done_today = true;
                    self.flag_date = today;
                }
                self.focus = 0;
                self.flashes.submitted.raise(now);
            }
            Err(e) => {
                error!(error = %e, "Failed to record submission");
                self.set_status_message(format!("Failed to save entry: {}", e));
            }
        }
    }

    /// Close any visible overlay
    pub fn dismiss_flashes(&mut self) {
        self.flashes.submitted.dismiss();
        self.flashes.incomplete.dismiss();
    }

    /// Advance timers and collect background results. Called every loop.
    pub fn tick(&mut self, now: Instant) {
        self.frame_count = self.frame_count.wrapping_add(1);
        self.quote.poll();
        self.flashes.submitted.expire(now);
        self.flashes.incomplete.expire(now);
        self.check_status_message_timeout();

        if self.daytime.poll(self.clock.as_ref(), now).is_some() {
            self.focus = 0;
        }

        // Night spans midnight, so the date can change without the mode
        let today = self.clock.today();
        if today != self.flag_date {
            self.refresh_morning_done(today);
        }
    }

    fn refresh_morning_done(&mut self, today: NaiveDate) {
        // Recorded first so a failing read warns once per day, not per tick
        self.flag_date = today;
        match self.database.morning_completed_on(&format_date(today)) {
            Ok(done) => self.morning_done_today = done,
            Err(e) => {
                warn!(error = %e, "Failed to read morning flag");
                self.morning_done_today = false;
            }
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }
}
