pub mod cli;
pub mod config;
pub mod database;
pub mod journal;
pub mod logging;
pub mod models;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use utils::Profile;
