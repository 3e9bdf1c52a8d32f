use shared_types::{ResultRecord, SearchError};

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// The latest submission has not completed.
    Searching,
    /// The latest submission returned at least one result.
    Displaying,
    /// The latest submission returned no results.
    Empty,
    /// The latest submission failed.
    Errored,
}

/// Message to show above the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMessage {
    Error(String),
    NoResults,
}

/// Text shown when a search returns nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found :(";

impl SearchMessage {
    pub fn text(&self) -> &str {
        match self {
            SearchMessage::Error(text) => text,
            SearchMessage::NoResults => NO_RESULTS_MESSAGE,
        }
    }
}

/// Query and result state of one search page.
///
/// Read-only outside this crate; every mutation goes through
/// [`crate::SearchController`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSession {
    pub(crate) query_text: String,
    pub(crate) results: Vec<ResultRecord>,
    pub(crate) no_results: bool,
    pub(crate) errored: bool,
    pub(crate) query_id: u64,
    pub(crate) state: SearchState,
    pub(crate) error: Option<SearchError>,
}

impl SearchSession {
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn errored(&self) -> bool {
        self.errored
    }

    /// Id of the most recent submission; 0 before the first one.
    pub fn query_id(&self) -> u64 {
        self.query_id
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The failure behind the `Errored` state, if any.
    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// Error or empty-result message for the current query.
    pub fn message(&self) -> Option<SearchMessage> {
        if self.errored {
            let text = self
                .error
                .as_ref()
                .map(SearchError::user_message)
                .unwrap_or_else(|| shared_types::GENERIC_ERROR_MESSAGE.to_string());
            Some(SearchMessage::Error(text))
        } else if self.no_results {
            Some(SearchMessage::NoResults)
        } else {
            None
        }
    }
}
