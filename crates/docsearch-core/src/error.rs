//! Error types for docsearch-core.
//!
//! Search failures come in two flavours: errors carrying a message meant for
//! the user (query syntax problems reported by the search library, or no
//! result container at all), and everything else, which is only shown as a generic failure while the details
//! go to the log.

use thiserror::Error;

const NO_DATA_MESSAGE: &str = "No data to show";

/// Errors that can occur while running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The search library rejected the query with a readable message
    #[error("{0}")]
    Query(String),
    /// The search library returned no result container at all
    #[error("{}", NO_DATA_MESSAGE)]
    NoData,
    /// A required artifact could not be fetched
    #[error("Artifact fetch failed: {0}")]
    Fetch(String),
    /// Any other failure inside the search library or its bridge
    #[error("Search backend failed: {0}")]
    Backend(String),
}

impl SearchError {
    /// Message to show verbatim to the user, if this error carries one.
    ///
    /// Query errors and a missing result container qualify; everything else
    /// is reported generically.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SearchError::Query(message) if !message.is_empty() => Some(message),
            SearchError::NoData => Some(NO_DATA_MESSAGE),
            _ => None,
        }
    }
}

/// Errors that can occur while fetching a static artifact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The fetch facility itself is missing or failed before a response
    #[error("Fetch unavailable: {0}")]
    Unavailable(String),
    /// The server answered with a non-success status
    #[error("HTTP {status} fetching {path}")]
    Http { status: u16, path: String },
    /// The artifact does not exist
    #[error("Artifact not found: {0}")]
    NotFound(String),
    /// The response body could not be read as text
    #[error("Invalid artifact body: {0}")]
    InvalidBody(String),
}

/// Errors that can occur while loading a [`SearchConfig`](crate::SearchConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration text is not valid JSON for the expected shape
    #[error("Invalid search configuration: {0}")]
    Parse(String),
}

impl From<FetchError> for SearchError {
    fn from(err: FetchError) -> Self {
        SearchError::Fetch(err.to_string())
    }
}

impl From<SearchError> for String {
    fn from(err: SearchError) -> String {
        err.to_string()
    }
}
