//! Dashboard state and its transitions.
//!
//! All derived data lives in [`Board`] and is rebuilt from scratch whenever a
//! fetch result is applied.

use crate::{LookupError, board::Board, model::Snapshot};

/// Identifies one fetch cycle. Only the most recent request's result is
/// applied; anything older is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Failed,
    /// The result belonged to an older request and was dropped.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    city: String,
    input: String,
    snapshot: Option<Snapshot>,
    board: Option<Board>,
    error: Option<String>,
    generation: u64,
    loading: bool,
}

impl Dashboard {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The board, or `None` while data is missing or the last lookup failed.
    pub fn board(&self) -> Option<&Board> {
        if self.error.is_some() {
            return None;
        }
        self.board.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit the search box. Blank input is ignored and leaves everything,
    /// including the input text, as it was.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let city = self.input.trim();
        if city.is_empty() {
            return None;
        }

        self.city = city.to_string();
        self.input.clear();
        Some(self.request_refresh())
    }

    /// Start a new fetch cycle for the current city.
    pub fn request_refresh(&mut self) -> FetchRequest {
        self.generation += 1;
        self.error = None;
        self.loading = true;
        FetchRequest {
            generation: self.generation,
            city: self.city.clone(),
        }
    }

    /// Apply the outcome of a fetch cycle.
    pub fn apply(
        &mut self,
        request: &FetchRequest,
        result: Result<Snapshot, LookupError>,
    ) -> Applied {
        if request.generation != self.generation {
            return Applied::Stale;
        }
        self.loading = false;

        match result {
            Ok(snapshot) => {
                self.board = Some(Board::build(&snapshot.current, &snapshot.forecast));
                self.snapshot = Some(snapshot);
                self.error = None;
                Applied::Updated
            }
            // Cancelled without a newer request, e.g. on shutdown.
            Err(err) if err.is_cancelled() => Applied::Stale,
            Err(err) => {
                self.snapshot = None;
                self.board = None;
                self.error = Some(err.user_message().to_string());
                Applied::Failed
            }
        }
    }
}
