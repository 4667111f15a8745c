use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Draft, Field, JournalMode, Rating, SavedEntry};

/// Local date of the last accepted morning submission
pub const MORNING_COMPLETED_KEY: &str = "morning_completed_on";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("Failed to encode value for key '{key}': {source}")]
    EncodeError {
        key: String,
        source: serde_json::Error,
    },
    #[error("Stored entry has unknown mode: {0}")]
    UnknownMode(String),
}

/// Local persistence: a string-keyed value store for the draft plus the log
/// of accepted submissions
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and initialize the schema
    pub fn new(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.initialize_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// In-memory database, gone when dropped
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let db = Database {
            conn: Connection::open_in_memory()?,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS entries (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                date            TEXT NOT NULL,
                mode            TEXT NOT NULL,
                grateful        TEXT NOT NULL DEFAULT '',
                today           TEXT NOT NULL DEFAULT '',
                affirmation     TEXT NOT NULL DEFAULT '',
                intention       TEXT NOT NULL DEFAULT '',
                rating          INTEGER,
                thanks          TEXT NOT NULL DEFAULT '',
                highlights      TEXT NOT NULL DEFAULT '',
                reflection      TEXT NOT NULL DEFAULT '',
                created_at      TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date)",
            [],
        )?;

        Ok(())
    }

    /// Read a value, falling back to `default` when the key is missing or
    /// the stored value does not decode as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, DatabaseError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(raw) = raw else {
            return Ok(default);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Stored value has unexpected type, using default");
                Ok(default)
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), DatabaseError> {
        let raw = serde_json::to_string(value).map_err(|source| DatabaseError::EncodeError {
            key: key.to_string(),
            source,
        })?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, raw],
        )?;
        Ok(())
    }

    /// Read every draft field from the store
    pub fn load_draft(&self) -> Result<Draft, DatabaseError> {
        let mut draft = Draft::default();
        for field in Field::ALL {
            match field {
                Field::Rating => {
                    // 0 is the unset default
                    let raw: u8 = self.get(field.store_key(), 0)?;
                    draft.rating = Rating::new(raw);
                }
                _ => draft.set_text(field, self.get(field.store_key(), String::new())?),
            }
        }
        Ok(draft)
    }

    pub fn store_text(&self, field: Field, value: &str) -> Result<(), DatabaseError> {
        self.set(field.store_key(), value)
    }

    pub fn store_rating(&self, rating: Option<Rating>) -> Result<(), DatabaseError> {
        let raw = rating.map(Rating::value).unwrap_or(0);
        self.set(Field::Rating.store_key(), &raw)
    }

    /// Whether the morning prompts were submitted on `date` (YYYY-MM-DD)
    pub fn morning_completed_on(&self, date: &str) -> Result<bool, DatabaseError> {
        Ok(self.get(MORNING_COMPLETED_KEY, String::new())? == date)
    }

    /// Log an accepted submission, clear the submitted mode's draft fields
    /// and, for the morning, mark the day as done. All or nothing.
    pub fn record_submission(&self, entry: &SavedEntry) -> Result<i64, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;

        let id = self.insert_entry(entry)?;
        for &field in entry.mode.fields() {
            match field {
                Field::Rating => self.store_rating(None)?,
                _ => self.store_text(field, "")?,
            }
        }
        if entry.mode == JournalMode::Morning {
            self.set(MORNING_COMPLETED_KEY, entry.date.as_str())?;
        }

        tx.commit()?;
        debug!(id, mode = %entry.mode, date = %entry.date, "Submission recorded");
        Ok(id)
    }

    /// Append an accepted submission and return its ID
    pub fn insert_entry(&self, entry: &SavedEntry) -> Result<i64, DatabaseError> {
        let d = &entry.draft;
        self.conn.execute(
            "INSERT INTO entries (date, mode, grateful, today, affirmation, intention, rating, thanks, highlights, reflection, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                entry.date,
                entry.mode.as_str(),
                d.grateful,
                d.today,
                d.affirmation,
                d.intention,
                d.rating.map(Rating::value),
                d.thanks,
                d.highlights,
                d.reflection,
                entry.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Logged submissions, newest first
    pub fn list_entries(&self, limit: usize) -> Result<Vec<SavedEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, mode, grateful, today, affirmation, intention, rating, thanks, highlights, reflection, created_at
             FROM entries ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            let rating: Option<u8> = row.get(7)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                Draft {
                    grateful: row.get(3)?,
                    today: row.get(4)?,
                    affirmation: row.get(5)?,
                    intention: row.get(6)?,
                    rating: rating.and_then(Rating::new),
                    thanks: row.get(8)?,
                    highlights: row.get(9)?,
                    reflection: row.get(10)?,
                },
                row.get::<_, String>(11)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, date, mode, draft, created_at) = row?;
            let mode = JournalMode::parse(&mode).ok_or(DatabaseError::UnknownMode(mode))?;
            entries.push(SavedEntry {
                id: Some(id),
                date,
                mode,
                draft,
                created_at,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
impl Database {
    /// Drop a table so later statements against it fail
    pub(crate) fn drop_table(&self, table: &str) {
        self.conn
            .execute_batch(&format!("DROP TABLE {}", table))
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_returns_default() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("intention", String::new()).unwrap(), "");
        assert_eq!(db.get("todays_rating", 0u8).unwrap(), 0);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let db = Database::open_in_memory().unwrap();
        db.set("intention", "walk").unwrap();
        db.set("intention", "read").unwrap();
        assert_eq!(db.get("intention", String::new()).unwrap(), "read");
    }

    #[test]
    fn mistyped_value_falls_back_to_default() {
        let db = Database::open_in_memory().unwrap();
        db.set("todays_rating", "five").unwrap();
        assert_eq!(db.get("todays_rating", 0u8).unwrap(), 0);
    }

    #[test]
    fn holds_strings_numbers_and_bools() {
        let db = Database::open_in_memory().unwrap();
        db.set("a", "text").unwrap();
        db.set("b", &4u8).unwrap();
        db.set("c", &true).unwrap();
        assert_eq!(db.get("a", String::new()).unwrap(), "text");
        assert_eq!(db.get("b", 0u8).unwrap(), 4);
        assert!(db.get("c", false).unwrap());
    }

    #[test]
    fn draft_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diary.db");
        {
            let db = Database::new(&path).unwrap();
            db.store_text(Field::Grateful, "rain").unwrap();
            db.store_text(Field::Reflection, "slow day").unwrap();
            db.store_rating(Rating::new(2)).unwrap();
        }
        let db = Database::new(&path).unwrap();
        let draft = db.load_draft().unwrap();
        assert_eq!(draft.grateful, "rain");
        assert_eq!(draft.reflection, "slow day");
        assert_eq!(draft.rating, Rating::new(2));
        assert!(draft.intention.is_empty());
    }

    #[test]
    fn night_fields_do_not_alias_intention() {
        let db = Database::open_in_memory().unwrap();
        db.store_text(Field::Intention, "focus").unwrap();
        db.store_text(Field::Thanks, "showing up").unwrap();
        db.store_text(Field::Highlights, "sunset").unwrap();
        let draft = db.load_draft().unwrap();
        assert_eq!(draft.intention, "focus");
        assert_eq!(draft.thanks, "showing up");
        assert_eq!(draft.highlights, "sunset");
    }

    #[test]
    fn recording_morning_clears_only_morning_and_marks_day() {
        let db = Database::open_in_memory().unwrap();
        for field in JournalMode::Morning.fields() {
            db.store_text(*field, "x").unwrap();
        }
        db.store_text(Field::Thanks, "keep me").unwrap();
        let draft = db.load_draft().unwrap();

        let entry = SavedEntry::capture("2026-10-14".into(), JournalMode::Morning, &draft);
        db.record_submission(&entry).unwrap();

        let after = db.load_draft().unwrap();
        assert!(after.grateful.is_empty());
        assert!(after.intention.is_empty());
        assert_eq!(after.thanks, "keep me");
        assert!(db.morning_completed_on("2026-10-14").unwrap());
        assert!(!db.morning_completed_on("2026-10-15").unwrap());
        assert_eq!(db.list_entries(5).unwrap()[0].draft.grateful, "x");
    }

    #[test]
    fn recording_night_clears_rating() {
        let db = Database::open_in_memory().unwrap();
        db.store_rating(Rating::new(5)).unwrap();
        let draft = db.load_draft().unwrap();
        let entry = SavedEntry::capture("2026-10-14".into(), JournalMode::Night, &draft);
        db.record_submission(&entry).unwrap();
        assert!(db.load_draft().unwrap().rating.is_none());
        assert!(!db.morning_completed_on("2026-10-14").unwrap());
    }

    #[test]
    fn entries_list_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let morning = Draft {
            grateful: "coffee".into(),
            ..Draft::default()
        };
        let night = Draft {
            rating: Rating::new(4),
            thanks: "patience".into(),
            ..Draft::default()
        };
        db.insert_entry(&SavedEntry::capture("2026-10-13".into(), JournalMode::Morning, &morning))
            .unwrap();
        db.insert_entry(&SavedEntry::capture("2026-10-13".into(), JournalMode::Night, &night))
            .unwrap();

        let entries = db.list_entries(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mode, JournalMode::Night);
        assert_eq!(entries[0].draft.rating, Rating::new(4));
        assert_eq!(entries[1].draft.grateful, "coffee");

        assert_eq!(db.list_entries(1).unwrap().len(), 1);
    }
}
