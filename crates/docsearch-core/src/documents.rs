//! Document fragments for search results.
//!
//! The search library only returns refs. The documentation build also emits a
//! listing page with one element per documented object, keyed by the same
//! ref in its `id` attribute. Result rows are those elements, resolved here.
//!
//! This module uses the scraper crate (pure Rust, WASM-compatible) to parse the
//! listing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::backend::RankedResult;
use crate::error::SearchError;
use crate::fetch::ArtifactFetcher;

/// Marker text of the `.privacy` element for non-public objects.
const PRIVATE_MARKER: &str = "PRIVATE";

/// A renderable result row.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFragment {
    /// Ref of the documented object
    pub id: String,
    /// Outer HTML of the listing element
    pub html: String,
    /// Whether the object is private (hidden from the result count)
    pub private: bool,
}

impl DocumentFragment {
    pub fn is_public(&self) -> bool {
        !self.private
    }
}

/// Turns ranked refs into fragments, preserving rank order.
#[async_trait::async_trait(?Send)]
pub trait DocumentResolver {
    async fn resolve(
        &self,
        ranked: &[RankedResult],
    ) -> Result<Vec<DocumentFragment>, SearchError>;
}

/// Parsed document listing page.
#[derive(Debug, Default)]
pub struct DocumentListing {
    fragments: HashMap<String, DocumentFragment>,
}

impl DocumentListing {
    /// Parses the listing HTML, indexing every element with an `id`.
    ///
    /// **Example:**
    /// ```
    /// use docsearch_core::documents::DocumentListing;
    ///
    /// let html = r#"<article id="pkg.mod"><div class="privacy">PUBLIC</div></article>"#;
    /// let listing = DocumentListing::parse(html).unwrap();
    /// assert!(listing.get("pkg.mod").unwrap().is_public());
    /// ```
    pub fn parse(html: &str) -> Result<Self, SearchError> {
        let document = Html::parse_document(html);

        let id_selector = Selector::parse("[id]")
            .map_err(|e| SearchError::Backend(format!("Invalid CSS selector: {:?}", e)))?;
        let privacy_selector = Selector::parse(".privacy")
            .map_err(|e| SearchError::Backend(format!("Invalid CSS selector: {:?}", e)))?;

        let mut fragments = HashMap::new();
        for element in document.select(&id_selector) {
            let Some(id) = element.value().attr("id") else {
                continue;
            };
            // Ids are unique in a valid page; keep the first if not
            if fragments.contains_key(id) {
                continue;
            }

            let private = element
                .select(&privacy_selector)
                .next()
                .is_some_and(|privacy| privacy.inner_html().contains(PRIVATE_MARKER));

            fragments.insert(
                id.to_string(),
                DocumentFragment {
                    id: id.to_string(),
                    html: element.html(),
                    private,
                },
            );
        }

        debug!("Parsed document listing with {} entries", fragments.len());
        Ok(Self { fragments })
    }

    pub fn get(&self, id: &str) -> Option<&DocumentFragment> {
        self.fragments.get(id)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments for `ranked`, in rank order. Unknown refs are skipped.
    pub fn fragments_for(&self, ranked: &[RankedResult]) -> Vec<DocumentFragment> {
        ranked
            .iter()
            .filter_map(|result| {
                let fragment = self.get(&result.document_id).cloned();
                if fragment.is_none() {
                    warn!("No listing entry for {}", result.document_id);
                }
                fragment
            })
            .collect()
    }
}

/// [`DocumentResolver`] over the listing artifact, parsed once and kept.
pub struct ListingResolver {
    fetcher: Rc<dyn ArtifactFetcher>,
    path: String,
    listing: RefCell<Option<Rc<DocumentListing>>>,
}

impl ListingResolver {
    pub fn new(fetcher: Rc<dyn ArtifactFetcher>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
            listing: RefCell::new(None),
        }
    }

    async fn listing(&self) -> Result<Rc<DocumentListing>, SearchError> {
        if let Some(listing) = self.listing.borrow().as_ref() {
            return Ok(Rc::clone(listing));
        }

        let html = self.fetcher.fetch_text(&self.path).await?;
        let listing = Rc::new(DocumentListing::parse(&html)?);
        *self.listing.borrow_mut() = Some(Rc::clone(&listing));
        Ok(listing)
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentResolver for ListingResolver {
    async fn resolve(
        &self,
        ranked: &[RankedResult],
    ) -> Result<Vec<DocumentFragment>, SearchError> {
        Ok(self.listing().await?.fragments_for(ranked))
    }
}
