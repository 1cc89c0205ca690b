//! Errors raised while looking up weather for a city.

use thiserror::Error;

/// The only text the user ever sees for a failed lookup.
pub const LOOKUP_FAILED_MESSAGE: &str = "Could not verify the city name. Please try again shortly.";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Lookup was cancelled by a newer search")]
    Cancelled,
}

impl LookupError {
    /// User-facing message. Every failure collapses to the same text.
    pub fn user_message(&self) -> &'static str {
        LOOKUP_FAILED_MESSAGE
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
