//! Journaling rules that do not depend on the terminal: the day/night
//! switch, submission validation, self-dismissing flashes and the quote fetch.

pub mod daytime;
pub mod flash;
pub mod quote;
pub mod submission;

pub use daytime::{Clock, DaytimeSelector, NightWindow, SystemClock};
pub use flash::Flash;
pub use quote::{HttpQuoteSource, QuoteError, QuoteSource, QuoteState};
pub use submission::{Incomplete, validate};
