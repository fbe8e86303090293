//! Static artifact retrieval.
//!
//! Every artifact the search needs is a plain file next to the documentation
//! pages. [`ArtifactFetcher`] abstracts how the text is obtained (browser
//! `fetch()`, filesystem, in-memory fixtures) and [`CachedFetcher`] makes
//! repeated requests for the same path share a single download.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tracing::debug;

use crate::config::ArtifactPaths;
use crate::error::FetchError;

/// The static artifacts a search depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Page listing every documented object, used to build result rows
    DocumentListing,
    /// Index over names only
    CompactIndex,
    /// Index over names and docstrings
    FullIndex,
    /// The search library script
    SearchLibrary,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::DocumentListing,
        Artifact::CompactIndex,
        Artifact::FullIndex,
        Artifact::SearchLibrary,
    ];

    /// Relative path of this artifact.
    pub fn path(self, paths: &ArtifactPaths) -> &str {
        match self {
            Artifact::DocumentListing => &paths.document_listing,
            Artifact::CompactIndex => &paths.compact_index,
            Artifact::FullIndex => &paths.full_index,
            Artifact::SearchLibrary => &paths.search_library,
        }
    }
}

/// Source of artifact text.
#[async_trait::async_trait(?Send)]
pub trait ArtifactFetcher {
    /// Fetches the artifact at `path` as text.
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError>;
}

#[async_trait::async_trait(?Send)]
impl<T: ArtifactFetcher + ?Sized> ArtifactFetcher for Rc<T> {
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError> {
        (**self).fetch_text(path).await
    }
}

type SharedFetch = Shared<LocalBoxFuture<'static, Result<Rc<str>, FetchError>>>;

/// Fetcher that downloads each path at most once.
///
/// Concurrent callers share the in-flight download. Successful results stay
/// cached for the lifetime of the fetcher; failed ones are evicted so the next
/// request tries again.
pub struct CachedFetcher<F: ?Sized> {
    inner: Rc<F>,
    entries: RefCell<HashMap<String, SharedFetch>>,
}

impl<F: ArtifactFetcher + ?Sized + 'static> CachedFetcher<F> {
    pub fn new(inner: Rc<F>) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Whether `path` has a successful download cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.entries
            .borrow()
            .get(path)
            .is_some_and(|entry| matches!(entry.peek(), Some(Ok(_))))
    }

    fn entry(&self, path: &str) -> SharedFetch {
        let mut entries = self.entries.borrow_mut();
        entries
            .entry(path.to_string())
            .or_insert_with(|| {
                debug!("Fetching artifact {}", path);
                let inner = Rc::clone(&self.inner);
                let path = path.to_string();
                async move { inner.fetch_text(&path).await }
                    .boxed_local()
                    .shared()
            })
            .clone()
    }
}

#[async_trait::async_trait(?Send)]
impl<F: ArtifactFetcher + ?Sized + 'static> ArtifactFetcher for CachedFetcher<F> {
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError> {
        let result = self.entry(path).await;

        if result.is_err() {
            let mut entries = self.entries.borrow_mut();
            if entries
                .get(path)
                .is_some_and(|entry| matches!(entry.peek(), Some(Err(_))))
            {
                entries.remove(path);
            }
        }

        result
    }
}
