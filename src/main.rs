use clap::Parser;
use color_eyre::Result;
use diary::cli::{self, Cli, Commands};
use diary::journal::{HttpQuoteSource, QuoteState, SystemClock};
use diary::utils::expand_path;
use diary::{Config, Database, Profile, logging};
use std::time::Instant;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps a separate config and database
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(&expand_path(path), profile)?,
        None => Config::load_with_profile(profile)?,
    };

    let db_path = config.get_database_path();
    // Held until exit so buffered log lines are flushed
    let _log_guard = db_path.parent().and_then(logging::init_logging);
    let db = Database::new(&db_path)?;
    let clock = SystemClock;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let quote = if config.fetch_quote {
                QuoteState::spawn(HttpQuoteSource::new(config.quote_url.clone()))
            } else {
                QuoteState::disabled()
            };
            let app = diary::tui::App::new(config, db, Box::new(clock), quote, Instant::now())?;
            diary::tui::run_event_loop(app)?;
        }
        Commands::Status => {
            cli::handle_status(&db, config.night_window()?, &clock)?;
        }
        Commands::SubmitMorning {
            grateful,
            today,
            affirmations,
            intention,
        } => {
            cli::handle_submit_morning(grateful, today, affirmations, intention, &db, &clock)?;
        }
        Commands::SubmitNight {
            rating,
            thanks,
            highlights,
            reflection,
        } => {
            cli::handle_submit_night(rating, thanks, highlights, reflection, &db, &clock)?;
        }
        Commands::History { limit } => {
            cli::handle_history(limit, &db)?;
        }
        Commands::Quote => {
            cli::handle_quote(&config.quote_url)?;
        }
    }

    Ok(())
}
