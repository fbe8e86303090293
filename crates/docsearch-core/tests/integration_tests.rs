//! End-to-end tests for the search session.
//!
//! These tests drive a [`SearchSession`] through its public API only:
//! 1. Artifacts: served from memory through a [`CachedFetcher`]
//! 2. Search: a scripted library returning ranked refs
//! 3. Rendering: refs resolved against a real listing page by [`ListingResolver`]
//!
//! Run with: `cargo test -p docsearch-core --test integration_tests`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use docsearch_core::view::messages;
use docsearch_core::{
    ArtifactFetcher, CachedFetcher, DocumentFragment, FetchError, IndexArtifact,
    ListingResolver, RankedResult, SearchBackend, SearchConfig, SearchError, SearchOutcome,
    SearchRequest, SearchSession, SearchView,
};

// ============================================================================
// Fixtures
// ============================================================================

const LISTING: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="search-results-container">
    <article id="twisted.internet.reactor">
      <code>twisted.internet.reactor</code>
      <div class="privacy">PUBLIC</div>
    </article>
    <article id="twisted.internet.reactor.run">
      <code>twisted.internet.reactor.run</code>
      <div class="privacy">PUBLIC</div>
    </article>
    <article id="twisted.internet._sslverify">
      <code>twisted.internet._sslverify</code>
      <div class="privacy">PRIVATE</div>
    </article>
  </div>
</body>
</html>"#;

struct SiteFetcher {
    files: HashMap<&'static str, String>,
    requests: RefCell<Vec<String>>,
}

impl SiteFetcher {
    fn new() -> Self {
        let files = HashMap::from([
            ("all-documents.html", LISTING.to_string()),
            ("searchindex.json", r#"{"version":"2.3.9"}"#.to_string()),
            ("fullsearchindex.json", r#"{"version":"2.3.9"}"#.to_string()),
            ("lunr.js", "/* lunr */".to_string()),
        ]);
        Self {
            files,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }
}

#[async_trait::async_trait(?Send)]
impl ArtifactFetcher for SiteFetcher {
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError> {
        self.requests.borrow_mut().push(path.to_string());
        self.files
            .get(path)
            .map(|text| Rc::from(text.as_str()))
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

/// Answers a few known queries; everything else matches nothing.
#[derive(Default)]
struct ScriptedLibrary {
    requests: RefCell<Vec<SearchRequest>>,
}

#[async_trait::async_trait(?Send)]
impl SearchBackend for ScriptedLibrary {
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<Vec<RankedResult>>, SearchError> {
        self.requests.borrow_mut().push(request.clone());
        match request.query.as_str() {
            "reactor" => Ok(Some(vec![
                RankedResult::new("twisted.internet.reactor", 14.2),
                RankedResult::new("twisted.internet.reactor.run", 9.7),
                RankedResult::new("twisted.internet.gone", 8.0),
            ])),
            "ssl" => Ok(Some(vec![RankedResult::new(
                "twisted.internet._sslverify",
                3.1,
            )])),
            "name:" => Err(SearchError::Query(
                "expecting term or field, found 'EOS'".to_string(),
            )),
            _ => Ok(Some(Vec::new())),
        }
    }
}

#[derive(Default)]
struct PageState {
    status: String,
    warning: String,
    rows: Vec<DocumentFragment>,
    results_visible: bool,
    clear_button_visible: bool,
    help_visible: bool,
}

#[derive(Default)]
struct Page {
    state: RefCell<PageState>,
}

impl SearchView for Page {
    fn set_status(&self, message: &str) {
        self.state.borrow_mut().status = message.to_string();
    }

    fn set_warning(&self, message: &str) {
        self.state.borrow_mut().warning = message.to_string();
    }

    fn set_results(&self, fragments: Vec<DocumentFragment>) {
        self.state.borrow_mut().rows = fragments;
    }

    fn clear_results(&self) {
        self.state.borrow_mut().rows.clear();
    }

    fn set_results_visible(&self, visible: bool) {
        self.state.borrow_mut().results_visible = visible;
    }

    fn set_clear_button_visible(&self, visible: bool) {
        self.state.borrow_mut().clear_button_visible = visible;
    }

    fn set_help_visible(&self, visible: bool) {
        self.state.borrow_mut().help_visible = visible;
    }
}

struct Site {
    session: SearchSession,
    origin: Rc<SiteFetcher>,
    library: Rc<ScriptedLibrary>,
    page: Rc<Page>,
}

fn site() -> Site {
    // Real clock: repeated queries in a test can land inside the window
    let config = SearchConfig {
        duplicate_trigger_window_micros: 0,
        ..SearchConfig::default()
    };
    let origin = Rc::new(SiteFetcher::new());
    let fetcher: Rc<dyn ArtifactFetcher> = Rc::new(CachedFetcher::new(Rc::clone(&origin)));
    let library = Rc::new(ScriptedLibrary::default());
    let page = Rc::new(Page::default());
    let resolver = Rc::new(ListingResolver::new(
        Rc::clone(&fetcher),
        config.paths.document_listing.clone(),
    ));

    let session = SearchSession::new(config, fetcher, library.clone(), resolver, page.clone());
    Site {
        session,
        origin,
        library,
        page,
    }
}

fn row_ids(page: &Page) -> Vec<String> {
    page.state.borrow().rows.iter().map(|f| f.id.clone()).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_typing_renders_listing_rows_in_rank_order() {
    let site = site();

    let outcome = site.session.on_input("reactor".to_string()).await;

    // The unknown ref is dropped, the rest keep their rank
    assert_eq!(outcome, SearchOutcome::Rendered { total: 2, public: 2 });
    assert_eq!(
        row_ids(&site.page),
        vec!["twisted.internet.reactor", "twisted.internet.reactor.run"]
    );
    let state = site.page.state.borrow();
    assert!(state.rows[0].html.contains("<code>twisted.internet.reactor</code>"));
    assert_eq!(state.status, "Search for \"reactor\" yielded 2 results.");
    assert_eq!(state.warning, "");
    assert!(state.results_visible);
    assert!(state.clear_button_visible);
}

#[tokio::test]
async fn test_artifacts_are_downloaded_once() {
    let site = site();

    site.session.on_focus().await;
    site.session.on_input("reactor".to_string()).await;
    site.session.on_enter().await;

    assert_eq!(site.origin.request_count("all-documents.html"), 1);
    assert_eq!(site.origin.request_count("lunr.js"), 1);
    assert_eq!(site.origin.request_count("fullsearchindex.json"), 1);
    assert_eq!(site.library.requests.borrow().len(), 2);
}

#[tokio::test]
async fn test_private_only_match_with_poor_score() {
    let site = site();

    let outcome = site.session.on_input("ssl".to_string()).await;

    assert_eq!(outcome, SearchOutcome::Rendered { total: 1, public: 0 });
    let state = site.page.state.borrow();
    assert_eq!(
        state.status,
        "No results matches \"ssl\". Some private objects matches your search though."
    );
    assert_eq!(state.warning, messages::POOR_RESULTS);
    assert!(state.rows[0].private);
}

#[tokio::test]
async fn test_query_syntax_error_is_shown() {
    let site = site();

    site.session.on_input("name:".to_string()).await;

    let state = site.page.state.borrow();
    assert_eq!(state.status, "");
    assert_eq!(state.warning, "expecting term or field, found 'EOS'");
    assert!(state.rows.is_empty());
}

#[tokio::test]
async fn test_docstrings_then_clear() {
    let site = site();

    site.session.on_input("reactor".to_string()).await;
    site.session.toggle_docstrings(true).await;
    {
        let requests = site.library.requests.borrow();
        let last = requests.last().unwrap();
        assert_eq!(last.index, IndexArtifact::Full);
        assert_eq!(last.index_path, "fullsearchindex.json");
        assert!(last.fields.iter().any(|f| f == "docstring"));
    }

    site.session.clear_search();

    assert_eq!(site.session.input(), "");
    let state = site.page.state.borrow();
    assert!(state.rows.is_empty());
    assert!(!state.results_visible);
    assert!(!state.clear_button_visible);
    assert!(!state.help_visible);
}
