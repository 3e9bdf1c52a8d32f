use serde::{Deserialize, Serialize};
use std::fmt;

use crate::BackendErrorPayload;

/// Categorization of search pipeline errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchErrorKind {
    /// The request could not complete or the body was not a search payload.
    TransportError,
    /// The backend answered with an explicit error payload.
    BackendError,
    /// A single document could not be normalized and was dropped.
    MalformedDocError,
}

impl fmt::Display for SearchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchErrorKind::TransportError => write!(f, "TransportError"),
            SearchErrorKind::BackendError => write!(f, "BackendError"),
            SearchErrorKind::MalformedDocError => write!(f, "MalformedDocError"),
        }
    }
}

/// Structured error produced by the search client and normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub detail: String,
}

/// Message shown for failures whose detail is not meant for users.
pub const GENERIC_ERROR_MESSAGE: &str = "Oops! An error occurred while performing your search.";

impl SearchError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            kind: SearchErrorKind::TransportError,
            detail: detail.into(),
        }
    }

    pub fn backend(detail: impl Into<String>) -> Self {
        Self {
            kind: SearchErrorKind::BackendError,
            detail: detail.into(),
        }
    }

    pub fn malformed_doc(detail: impl Into<String>) -> Self {
        Self {
            kind: SearchErrorKind::MalformedDocError,
            detail: detail.into(),
        }
    }

    /// Text to show in the UI. Backend messages are shown verbatim with
    /// their kind; anything else gets the generic message.
    pub fn user_message(&self) -> String {
        match self.kind {
            SearchErrorKind::BackendError => self.to_string(),
            SearchErrorKind::TransportError | SearchErrorKind::MalformedDocError => {
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<&BackendErrorPayload> for SearchError {
    fn from(payload: &BackendErrorPayload) -> Self {
        SearchError::backend(format!("{}: {}", payload.error_type, payload.message))
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl std::error::Error for SearchError {}
