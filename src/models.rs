use serde::{Deserialize, Serialize};
use std::fmt;

/// Which set of prompts is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalMode {
    Morning,
    Night,
}

impl JournalMode {
    /// Fields shown for this mode, in display order
    pub fn fields(self) -> &'static [Field] {
        match self {
            JournalMode::Morning => &[
                Field::Grateful,
                Field::TodayGoal,
                Field::Affirmation,
                Field::Intention,
            ],
            JournalMode::Night => &[
                Field::Rating,
                Field::Thanks,
                Field::Highlights,
                Field::Reflection,
            ],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            JournalMode::Morning => "Morning journaling",
            JournalMode::Night => "Night journaling",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JournalMode::Morning => "morning",
            JournalMode::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(JournalMode::Morning),
            "night" => Some(JournalMode::Night),
            _ => None,
        }
    }
}

impl fmt::Display for JournalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Grateful,
    TodayGoal,
    Affirmation,
    Intention,
    Rating,
    Thanks,
    Highlights,
    Reflection,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Grateful,
        Field::TodayGoal,
        Field::Affirmation,
        Field::Intention,
        Field::Rating,
        Field::Thanks,
        Field::Highlights,
        Field::Reflection,
    ];

    /// Prompt shown above the input
    pub fn prompt(self) -> &'static str {
        match self {
            Field::Grateful => "I am grateful for",
            Field::TodayGoal => "What would make today great",
            Field::Affirmation => "Daily affirmations, I am...",
            Field::Intention => "Todays' intention",
            Field::Rating => "Rate today from 1 to 5",
            Field::Thanks => "I thank myself today for...",
            Field::Highlights => "3 great things that happened today...",
            Field::Reflection => "5 min. reflection",
        }
    }

    /// Key the draft value is persisted under
    pub fn store_key(self) -> &'static str {
        match self {
            Field::Grateful => "grateful",
            Field::TodayGoal => "today",
            Field::Affirmation => "affirmations",
            Field::Intention => "intention",
            Field::Rating => "todays_rating",
            Field::Thanks => "thank",
            Field::Highlights => "great_things",
            Field::Reflection => "highlight",
        }
    }

    pub fn mode(self) -> JournalMode {
        match self {
            Field::Grateful | Field::TodayGoal | Field::Affirmation | Field::Intention => {
                JournalMode::Morning
            }
            Field::Rating | Field::Thanks | Field::Highlights | Field::Reflection => {
                JournalMode::Night
            }
        }
    }

    pub fn is_text(self) -> bool {
        self != Field::Rating
    }
}

/// A day rating, always within 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Next rating up, saturating at 5. An unset rating starts at 1.
    pub fn step_up(current: Option<Self>) -> Self {
        match current {
            Some(r) => Self(r.0.saturating_add(1).min(Self::MAX)),
            None => Self(Self::MIN),
        }
    }

    /// Next rating down, saturating at 1
    pub fn step_down(current: Option<Self>) -> Self {
        match current {
            Some(r) => Self(r.0.saturating_sub(1).max(Self::MIN)),
            None => Self(Self::MIN),
        }
    }

    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating must be 1-5, got {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// The journal entry being written. There is no date key: the draft is
/// overwritten each day rather than appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub grateful: String,
    pub today: String,
    pub affirmation: String,
    pub intention: String,
    pub rating: Option<Rating>,
    pub thanks: String,
    pub highlights: String,
    pub reflection: String,
}

impl Draft {
    /// Text value of a field. Returns None for the rating.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Grateful => &self.grateful,
            Field::TodayGoal => &self.today,
            Field::Affirmation => &self.affirmation,
            Field::Intention => &self.intention,
            Field::Thanks => &self.thanks,
            Field::Highlights => &self.highlights,
            Field::Reflection => &self.reflection,
            Field::Rating => return None,
        };
        Some(value.as_str())
    }

    /// Set a text field. Ignored for the rating.
    pub fn set_text(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Grateful => &mut self.grateful,
            Field::TodayGoal => &mut self.today,
            Field::Affirmation => &mut self.affirmation,
            Field::Intention => &mut self.intention,
            Field::Thanks => &mut self.thanks,
            Field::Highlights => &mut self.highlights,
            Field::Reflection => &mut self.reflection,
            Field::Rating => return,
        };
        *slot = value;
    }

    /// Whether a field holds a usable value
    pub fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::Rating => self.rating.is_some(),
            _ => self.text(field).is_some_and(|s| !s.trim().is_empty()),
        }
    }

    /// Reset every field belonging to `mode`
    pub fn clear_mode(&mut self, mode: JournalMode) {
        for &field in mode.fields() {
            match field {
                Field::Rating => self.rating = None,
                _ => self.set_text(field, String::new()),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// An accepted submission as recorded in the entries log
#[derive(Debug, Clone)]
pub struct SavedEntry {
    pub id: Option<i64>,
    pub date: String, // YYYY-MM-DD, local
    pub mode: JournalMode,
    pub draft: Draft,
    pub created_at: String,
}

impl SavedEntry {
    /// Capture the fields of `mode` from the draft
    pub fn capture(date: String, mode: JournalMode, draft: &Draft) -> Self {
        let mut captured = Draft::default();
        for &field in mode.fields() {
            match field {
                Field::Rating => captured.rating = draft.rating,
                _ => {
                    if let Some(text) = draft.text(field) {
                        captured.set_text(field, text.to_string());
                    }
                }
            }
        }
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            id: None,
            date,
            mode,
            draft: captured,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(3).map(Rating::value), Some(3));
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn rating_steps_saturate() {
        let five = Rating::new(5);
        assert_eq!(Rating::step_up(five).value(), 5);
        assert_eq!(Rating::step_down(Rating::new(1)).value(), 1);
        assert_eq!(Rating::step_up(None).value(), 1);
    }

    #[test]
    fn store_keys_are_distinct() {
        let mut keys: Vec<_> = Field::ALL.iter().map(|f| f.store_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Field::ALL.len());
    }

    #[test]
    fn whitespace_does_not_fill_a_field() {
        let mut draft = Draft::default();
        draft.set_text(Field::Thanks, "   \n".to_string());
        assert!(!draft.is_filled(Field::Thanks));
        draft.set_text(Field::Thanks, ".".to_string());
        assert!(draft.is_filled(Field::Thanks));
    }

    #[test]
    fn clear_mode_leaves_other_mode_alone() {
        let mut draft = Draft {
            grateful: "sun".into(),
            thanks: "rest".into(),
            rating: Rating::new(4),
            ..Draft::default()
        };
        draft.clear_mode(JournalMode::Night);
        assert_eq!(draft.grateful, "sun");
        assert!(draft.thanks.is_empty());
        assert!(draft.rating.is_none());
    }

    #[test]
    fn capture_keeps_only_submitted_mode() {
        let draft = Draft {
            grateful: "sun".into(),
            thanks: "rest".into(),
            ..Draft::default()
        };
        let entry = SavedEntry::capture("2026-10-14".into(), JournalMode::Morning, &draft);
        assert_eq!(entry.draft.grateful, "sun");
        assert!(entry.draft.thanks.is_empty());
    }
}
