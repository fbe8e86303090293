//! Interface to the opaque search library.
//!
//! Tokenizing, indexing and scoring all happen in the external library. The
//! session only hands it a [`SearchRequest`] and consumes the ranked refs it
//! returns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ArtifactPaths;
use crate::error::SearchError;
use crate::fetch::Artifact;

/// Which index a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexArtifact {
    /// Names only
    Compact,
    /// Names and docstrings
    Full,
}

impl IndexArtifact {
    pub fn for_docstrings(include_docstrings: bool) -> Self {
        if include_docstrings {
            IndexArtifact::Full
        } else {
            IndexArtifact::Compact
        }
    }

    pub fn artifact(self) -> Artifact {
        match self {
            IndexArtifact::Compact => Artifact::CompactIndex,
            IndexArtifact::Full => Artifact::FullIndex,
        }
    }

    pub fn path(self, paths: &ArtifactPaths) -> &str {
        self.artifact().path(paths)
    }
}

/// Identity of a search request.
///
/// `started_at` feeds the duplicate-trigger filter; `seq` is the logical
/// clock the staleness check compares, and only ever grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestStamp {
    pub started_at: Duration,
    pub seq: u64,
}

/// Everything the search library needs for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub stamp: RequestStamp,
    pub index: IndexArtifact,
    pub index_path: String,
    pub library_path: String,
    pub fields: Vec<String>,
    /// How long the library should wait before searching (zero on Enter)
    pub delay: Duration,
}

/// One entry of the ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Document identifier, as stored in the index
    #[serde(rename = "ref")]
    pub document_id: String,
    /// Relevance score, higher is better
    pub score: f64,
}

impl RankedResult {
    pub fn new(document_id: impl Into<String>, score: f64) -> Self {
        Self {
            document_id: document_id.into(),
            score,
        }
    }
}

/// The external search library.
#[async_trait::async_trait(?Send)]
pub trait SearchBackend {
    /// Whether the host can run searches at all (e.g. Web Workers exist).
    fn is_supported(&self) -> bool {
        true
    }

    /// Runs the search.
    ///
    /// `Ok(None)` means the library produced no result container, which is
    /// different from an empty result list.
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<Vec<RankedResult>>, SearchError>;

    /// Best-effort cancellation of in-flight work.
    fn abort(&self) {}
}
