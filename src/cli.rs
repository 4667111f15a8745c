use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use crate::database::{Database, DatabaseError};
use crate::journal::quote::{HttpQuoteSource, QuoteError, QuoteSource};
use crate::journal::submission::SUCCESS_MESSAGE;
use crate::journal::{Clock, Incomplete, NightWindow, validate};
use crate::models::{Draft, Field, JournalMode, Rating, SavedEntry};
use crate::utils::format_date;

#[derive(Parser)]
#[command(name = "diary")]
#[command(about = "Morning and night journaling in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Show the active mode and its saved draft
    Status,
    /// Submit the morning journal
    SubmitMorning {
        /// I am grateful for
        #[arg(long)]
        grateful: Option<String>,
        /// What would make today great
        #[arg(long)]
        today: Option<String>,
        /// Daily affirmations, I am...
        #[arg(long)]
        affirmations: Option<String>,
        /// Todays' intention
        #[arg(long)]
        intention: Option<String>,
    },
    /// Submit the night journal
    SubmitNight {
        /// Rate today from 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
        /// I thank myself today for...
        #[arg(long)]
        thanks: Option<String>,
        /// 3 great things that happened today...
        #[arg(long)]
        highlights: Option<String>,
        /// 5 min. reflection
        #[arg(long)]
        reflection: Option<String>,
    },
    /// List submitted entries, newest first
    History {
        /// Maximum number of entries
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Fetch and print today's quote
    Quote,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error("{0}")]
    Incomplete(#[from] Incomplete),
    #[error("Failed to fetch quote: {0}")]
    QuoteError(#[from] QuoteError),
}

/// Handle the status command
pub fn handle_status(db: &Database, window: NightWindow, clock: &dyn Clock) -> Result<(), CliError> {
    let mode = window.mode_at(clock.local_hour());
    let today = format_date(clock.today());
    let draft = db.load_draft()?;

    println!("Mode: {}", mode.title());
    if db.morning_completed_on(&today)? {
        println!("Morning journaling done today");
    }
    for &field in mode.fields() {
        println!("{}: {}", field.prompt(), display_value(&draft, field));
    }
    Ok(())
}

fn display_value(draft: &Draft, field: Field) -> String {
    match field {
        Field::Rating => draft
            .rating
            .map(|r| r.value().to_string())
            .unwrap_or_else(|| "-".to_string()),
        _ => draft.text(field).unwrap_or_default().to_string(),
    }
}

/// Handle the submit-morning command
pub fn handle_submit_morning(
    grateful: Option<String>,
    today: Option<String>,
    affirmations: Option<String>,
    intention: Option<String>,
    db: &Database,
    clock: &dyn Clock,
) -> Result<(), CliError> {
    let mut draft = db.load_draft()?;
    for (field, value) in [
        (Field::Grateful, grateful),
        (Field::TodayGoal, today),
        (Field::Affirmation, affirmations),
        (Field::Intention, intention),
    ] {
        if let Some(value) = value {
            db.store_text(field, &value)?;
            draft.set_text(field, value);
        }
    }
    submit(&draft, JournalMode::Morning, db, clock)
}

/// Handle the submit-night command
pub fn handle_submit_night(
    rating: Option<u8>,
    thanks: Option<String>,
    highlights: Option<String>,
    reflection: Option<String>,
    db: &Database,
    clock: &dyn Clock,
) -> Result<(), CliError> {
    let mut draft = db.load_draft()?;
    // clap already restricts the range
    if let Some(rating) = rating.and_then(Rating::new) {
        db.store_rating(Some(rating))?;
        draft.rating = Some(rating);
    }
    for (field, value) in [
        (Field::Thanks, thanks),
        (Field::Highlights, highlights),
        (Field::Reflection, reflection),
    ] {
        if let Some(value) = value {
            db.store_text(field, &value)?;
            draft.set_text(field, value);
        }
    }
    submit(&draft, JournalMode::Night, db, clock)
}

fn submit(draft: &Draft, mode: JournalMode, db: &Database, clock: &dyn Clock) -> Result<(), CliError> {
    validate(draft, mode)?;
    let entry = SavedEntry::capture(format_date(clock.today()), mode, draft);
    let id = db.record_submission(&entry)?;
    info!(id, %mode, "Journal submitted from command line");
    println!("Saved {} entry (ID: {})", mode, id);
    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}

/// Handle the history command
pub fn handle_history(limit: usize, db: &Database) -> Result<(), CliError> {
    let entries = db.list_entries(limit)?;
    if entries.is_empty() {
        println!("No entries yet");
        return Ok(());
    }

    for entry in entries {
        println!("{} {} ({})", entry.date, entry.mode.title(), entry.created_at);
        for &field in entry.mode.fields() {
            println!("  {}: {}", field.prompt(), display_value(&entry.draft, field));
        }
    }
    Ok(())
}

/// Handle the quote command
pub fn handle_quote(url: &str) -> Result<(), CliError> {
    let quote = HttpQuoteSource::new(url).fetch()?;
    println!("\"{}\"", quote.text);
    println!("  - {}", quote.author);
    Ok(())
}
