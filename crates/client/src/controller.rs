use shared_types::{Query, RawSearchResponse, SearchError};

use crate::client::SearchClient;
use crate::normalize::normalize;
use crate::session::{SearchMessage, SearchSession, SearchState};

/// Key that submits the query from the input field.
pub const SUBMIT_KEY: &str = "Enter";

/// A submission stamped with the query id that was current when it was made.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    query_id: u64,
    query: Query,
}

impl SearchTicket {
    pub fn query_id(&self) -> u64 {
        self.query_id
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Send the query. Never fails: transport errors travel inside the
    /// completion so the controller can decide whether they still matter.
    pub async fn dispatch(self, client: &SearchClient) -> SearchCompletion {
        let outcome = client
            .search(&self.query.text, self.query.core_filter.as_deref())
            .await;
        SearchCompletion {
            query_id: self.query_id,
            outcome,
        }
    }
}

/// The finished request for one ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCompletion {
    pub query_id: u64,
    pub outcome: Result<RawSearchResponse, SearchError>,
}

impl SearchCompletion {
    pub fn new(query_id: u64, outcome: Result<RawSearchResponse, SearchError>) -> Self {
        Self { query_id, outcome }
    }
}

/// Sole writer of a [`SearchSession`].
///
/// A search is three steps so the session is never borrowed across the
/// network call: [`submit`](Self::submit) stamps a ticket,
/// [`SearchTicket::dispatch`] runs the request, and
/// [`apply`](Self::apply) folds the completion back in. Completions whose
/// id is no longer current are discarded, so a slow early response can
/// never overwrite a later one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchController {
    session: SearchSession,
    core_filter: Option<String>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn state(&self) -> SearchState {
        self.session.state
    }

    pub fn message(&self) -> Option<SearchMessage> {
        self.session.message()
    }

    pub fn core_filter(&self) -> Option<&str> {
        self.core_filter.as_deref()
    }

    /// Input field changed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.session.query_text = text.into();
    }

    /// Restrict later submissions to a core; `None` or blank searches all.
    pub fn set_core_filter(&mut self, core_filter: Option<String>) {
        self.core_filter = core_filter.filter(|c| !c.trim().is_empty());
    }

    /// Key pressed in the input field. Only [`SUBMIT_KEY`] submits.
    pub fn key_event(&mut self, key: &str) -> Option<SearchTicket> {
        if key == SUBMIT_KEY {
            self.submit()
        } else {
            None
        }
    }

    /// Replace the query text and submit it. Blank text changes nothing.
    pub fn submit_text(&mut self, text: impl Into<String>) -> Option<SearchTicket> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        self.set_query(text);
        self.submit()
    }

    /// Start a search for the current query text.
    ///
    /// Returns `None` without touching the session when the text is empty
    /// or whitespace. Otherwise bumps the query id, clears the result flags
    /// and returns the ticket to dispatch.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        if self.session.query_text.trim().is_empty() {
            return None;
        }

        self.session.query_id += 1;
        self.session.no_results = false;
        self.session.errored = false;
        self.session.error = None;
        self.session.state = SearchState::Searching;

        let query = Query::new(self.session.query_text.clone())
            .with_core_filter(self.core_filter.clone());
        tracing::debug!(query_id = self.session.query_id, query = %query.text, "search submitted");

        Some(SearchTicket {
            query_id: self.session.query_id,
            query,
        })
    }

    /// Whether a completion for `query_id` would be applied.
    pub fn is_current(&self, query_id: u64) -> bool {
        query_id == self.session.query_id
    }

    /// Fold a completion into the session. Returns `false` if it was stale
    /// and discarded.
    pub fn apply(&mut self, completion: SearchCompletion) -> bool {
        if !self.is_current(completion.query_id) {
            tracing::debug!(
                stale = completion.query_id,
                current = self.session.query_id,
                "discarding stale search response"
            );
            return false;
        }

        match completion.outcome.and_then(normalize) {
            Ok(results) => {
                self.session.no_results = results.is_empty();
                self.session.state = if results.is_empty() {
                    SearchState::Empty
                } else {
                    SearchState::Displaying
                };
                self.session.results = results;
                self.session.errored = false;
                self.session.error = None;
            }
            Err(err) => {
                tracing::error!(query_id = completion.query_id, error = %err, "search failed");
                self.session.results.clear();
                self.session.no_results = false;
                self.session.errored = true;
                self.session.error = Some(err);
                self.session.state = SearchState::Errored;
            }
        }
        true
    }

    /// Submit, await and apply in one call, for callers that can hold the
    /// controller across the request. Returns whether a search was run.
    pub async fn run(&mut self, client: &SearchClient) -> bool {
        match self.submit() {
            Some(ticket) => {
                let completion = ticket.dispatch(client).await;
                self.apply(completion)
            }
            None => false,
        }
    }
}
