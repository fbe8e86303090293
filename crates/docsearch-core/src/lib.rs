//! # Docsearch Core
//!
//! Platform-independent orchestration for the search box of a statically
//! generated API documentation site.
//!
//! Ranking and indexing belong to an external search library; this crate only
//! sequences artifact fetches, debounce delays and result rendering around it,
//! and makes sure results of superseded queries never reach the page.
//!
//! ## Modules
//!
//! - [`session`] - Search orchestration and UI event handling ([`SearchSession`])
//! - [`delay`] - Search delay and search-as-you-type policy based on index size
//! - [`readiness`] - Shared cache of the artifacts a search needs
//! - [`backend`] - Trait for the opaque search library
//! - [`documents`] - Resolution of ranked refs into renderable fragments
//! - [`render`] - Result list, warning and summary status
//! - [`view`] - Trait for the page elements the session writes to
//! - [`fetch`] - Artifact retrieval and caching
//! - [`config`] - Tunable thresholds and artifact paths
//! - [`error`] - Error types
//! - [`platform`] - Timers and clocks for web and native targets

#![forbid(unsafe_code)]

pub mod backend;
pub mod config;
pub mod delay;
pub mod documents;
pub mod error;
pub mod fetch;
pub mod html;
pub mod platform;
pub mod readiness;
pub mod render;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use backend::{IndexArtifact, RankedResult, RequestStamp, SearchBackend, SearchRequest};
pub use config::SearchConfig;
pub use documents::{DocumentFragment, DocumentListing, DocumentResolver, ListingResolver};
pub use error::{ConfigError, FetchError, SearchError};
pub use fetch::{Artifact, ArtifactFetcher, CachedFetcher};
pub use session::{SearchOutcome, SearchSession};
pub use view::SearchView;
