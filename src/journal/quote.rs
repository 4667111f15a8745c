use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::Quote;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected quote payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Quote response was an empty list")]
    Empty,
    #[error("Quote fetch thread ended without a result")]
    Disconnected,
}

/// One element of the quote endpoint's JSON array
#[derive(Debug, Deserialize)]
struct QuotePayload {
    q: String,
    a: String,
}

/// Parse a response body shaped like `[{"q": "...", "a": "..."}, ...]`
pub fn parse_quote_response(body: &str) -> Result<Quote, QuoteError> {
    let payload: Vec<QuotePayload> = serde_json::from_str(body)?;
    let first = payload.into_iter().next().ok_or(QuoteError::Empty)?;
    Ok(Quote {
        text: first.q,
        author: first.a,
    })
}

pub trait QuoteSource: Send + 'static {
    fn fetch(&self) -> Result<Quote, QuoteError>;
}

/// Plain unauthenticated GET against a quote-of-the-day endpoint
pub struct HttpQuoteSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpQuoteSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::blocking::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch(&self) -> Result<Quote, QuoteError> {
        debug!(url = %self.url, "Fetching quote");
        let response = self.client.get(&self.url).send()?.error_for_status()?;
        debug!(status = %response.status(), "Quote response received");
        let body = response.text()?;
        parse_quote_response(&body)
    }
}

/// Quote shown on screen plus the in-flight fetch, if any
#[derive(Debug)]
pub struct QuoteState {
    pub loading: bool,
    pub quote: Option<Quote>,
    pending: Option<Receiver<Result<Quote, QuoteError>>>,
}

impl QuoteState {
    /// Start fetching on a background thread
    pub fn spawn<S: QuoteSource>(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // Receiver may be gone if the app quit first
            let _ = tx.send(source.fetch());
        });
        Self {
            loading: true,
            quote: None,
            pending: Some(rx),
        }
    }

    /// No fetch at all: nothing loading, nothing shown
    pub fn disabled() -> Self {
        Self {
            loading: false,
            quote: None,
            pending: None,
        }
    }

    /// Collect the fetch result if it has arrived. Returns true when the
    /// state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_ref() else {
            return false;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(QuoteError::Disconnected),
        };
        self.finish(result);
        true
    }

    /// Block until the fetch completes
    #[cfg(test)]
    fn wait(&mut self) {
        if let Some(rx) = self.pending.as_ref() {
            let result = rx.recv().unwrap_or(Err(QuoteError::Disconnected));
            self.finish(result);
        }
    }

    fn finish(&mut self, result: Result<Quote, QuoteError>) {
        match result {
            Ok(quote) => {
                info!(author = %quote.author, "Quote loaded");
                self.quote = Some(quote);
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch quote");
                self.quote = None;
            }
        }
        self.loading = false;
        self.pending = None;
    }
}
