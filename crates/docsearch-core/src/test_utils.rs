//! Test utilities for docsearch-core.
//!
//! In-memory stand-ins for the fetcher, the search library, the document
//! resolver, the page and the clock. Only compiled when running tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;

use crate::backend::{RankedResult, SearchBackend, SearchRequest};
use crate::config::SearchConfig;
use crate::documents::{DocumentFragment, DocumentResolver};
use crate::error::{FetchError, SearchError};
use crate::fetch::ArtifactFetcher;
use crate::platform::Clock;
use crate::session::SearchSession;
use crate::view::SearchView;

/// Text of exactly `megabytes` million bytes.
pub fn text_of_megabytes(megabytes: usize) -> String {
    "x".repeat(megabytes * 1_000_000)
}

pub fn fragment(id: &str, private: bool) -> DocumentFragment {
    DocumentFragment {
        id: id.to_string(),
        html: format!("<article id=\"{id}\"></article>"),
        private,
    }
}

pub fn ranked_with_scores(entries: &[(&str, f64)]) -> Vec<RankedResult> {
    entries
        .iter()
        .map(|(id, score)| RankedResult::new(*id, *score))
        .collect()
}

/// `count` results, the first scoring `top_score`.
pub fn ranked(count: usize, top_score: f64) -> Vec<RankedResult> {
    (0..count)
        .map(|i| RankedResult::new(format!("pkg.obj{i}"), top_score - i as f64 * 0.001))
        .collect()
}

// =============================================================================
// Fetcher
// =============================================================================

/// Serves artifacts from memory and counts requests per path.
#[derive(Default)]
pub struct MockFetcher {
    artifacts: RefCell<HashMap<String, Rc<str>>>,
    counts: RefCell<HashMap<String, usize>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, path: &str, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&self, path: &str, text: &str) {
        self.artifacts
            .borrow_mut()
            .insert(path.to_string(), Rc::from(text));
    }

    pub fn fetch_count(&self, path: &str) -> usize {
        self.counts.borrow().get(path).copied().unwrap_or(0)
    }
}

#[async_trait::async_trait(?Send)]
impl ArtifactFetcher for MockFetcher {
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError> {
        *self.counts.borrow_mut().entry(path.to_string()).or_default() += 1;
        self.artifacts
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}

/// The artifacts of a small documentation site.
pub fn site_fetcher() -> MockFetcher {
    MockFetcher::new()
        .with("all-documents.html", "<html><body></body></html>")
        .with("searchindex.json", "{}")
        .with("fullsearchindex.json", "{}")
        .with("lunr.js", "// lunr")
}

// =============================================================================
// Backend
// =============================================================================

type Response = Result<Option<Vec<RankedResult>>, SearchError>;

/// Scripted search library.
///
/// Queries without a scripted response return an empty result list. A gate
/// holds the response for its query until the paired sender fires.
#[derive(Default)]
pub struct MockBackend {
    unsupported: Cell<bool>,
    responses: RefCell<HashMap<String, Response>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    requests: RefCell<Vec<SearchRequest>>,
    aborts: Cell<usize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported(self) -> Self {
        self.unsupported.set(true);
        self
    }

    pub fn respond(&self, query: &str, response: Response) {
        self.responses
            .borrow_mut()
            .insert(query.to_string(), response);
    }

    /// Holds the response for `query` until the returned sender fires.
    pub fn gate(&self, query: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(query.to_string(), rx);
        tx
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn abort_count(&self) -> usize {
        self.aborts.get()
    }
}

#[async_trait::async_trait(?Send)]
impl SearchBackend for MockBackend {
    fn is_supported(&self) -> bool {
        !self.unsupported.get()
    }

    async fn search(&self, request: &SearchRequest) -> Response {
        self.requests.borrow_mut().push(request.clone());

        let gate = self.gates.borrow_mut().remove(&request.query);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.responses
            .borrow()
            .get(&request.query)
            .cloned()
            .unwrap_or(Ok(Some(Vec::new())))
    }

    fn abort(&self) {
        self.aborts.set(self.aborts.get() + 1);
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves every ref; refs listed as private get the private flag.
#[derive(Default)]
pub struct StaticResolver {
    private_ids: HashSet<String>,
    failure: Option<SearchError>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_private(mut self, ids: &[&str]) -> Self {
        self.private_ids
            .extend(ids.iter().map(|id| id.to_string()));
        self
    }

    pub fn failing(mut self, err: SearchError) -> Self {
        self.failure = Some(err);
        self
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentResolver for StaticResolver {
    async fn resolve(
        &self,
        ranked: &[RankedResult],
    ) -> Result<Vec<DocumentFragment>, SearchError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(ranked
            .iter()
            .map(|r| fragment(&r.document_id, self.private_ids.contains(&r.document_id)))
            .collect())
    }
}

// =============================================================================
// View
// =============================================================================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ViewState {
    pub status: String,
    pub warning: String,
    pub results: Vec<DocumentFragment>,
    pub results_visible: bool,
    pub clear_button_visible: bool,
    pub help_visible: bool,
    /// Every status written, in order
    pub status_history: Vec<String>,
    /// Number of times the result list was replaced with rows
    pub renders: usize,
}

/// Records what the session writes to the page.
#[derive(Default)]
pub struct RecordingView {
    state: RefCell<ViewState>,
}

impl RecordingView {
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.state.borrow().status.clone()
    }

    pub fn warning(&self) -> String {
        self.state.borrow().warning.clone()
    }

    pub fn result_ids(&self) -> Vec<String> {
        self.state
            .borrow()
            .results
            .iter()
            .map(|f| f.id.clone())
            .collect()
    }
}

impl SearchView for RecordingView {
    fn set_status(&self, message: &str) {
        let mut state = self.state.borrow_mut();
        state.status = message.to_string();
        state.status_history.push(message.to_string());
    }

    fn set_warning(&self, message: &str) {
        self.state.borrow_mut().warning = message.to_string();
    }

    fn set_results(&self, fragments: Vec<DocumentFragment>) {
        let mut state = self.state.borrow_mut();
        state.results = fragments;
        state.renders += 1;
    }

    fn clear_results(&self) {
        self.state.borrow_mut().results.clear();
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

// =============================================================================
// Clock
// =============================================================================

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// =============================================================================
// Session harness
// =============================================================================

/// A session wired to mocks, with handles on each of them.
pub struct Harness {
    pub session: SearchSession,
    pub fetcher: Rc<MockFetcher>,
    pub backend: Rc<MockBackend>,
    pub view: Rc<RecordingView>,
    pub clock: Rc<ManualClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(site_fetcher(), MockBackend::new(), StaticResolver::new())
    }

    pub fn build(fetcher: MockFetcher, backend: MockBackend, resolver: StaticResolver) -> Self {
        let fetcher = Rc::new(fetcher);
        let backend = Rc::new(backend);
        let view = Rc::new(RecordingView::default());
        let clock = Rc::new(ManualClock::new());

        let session = SearchSession::new(
            SearchConfig::default(),
            fetcher.clone(),
            backend.clone(),
            Rc::new(resolver),
            view.clone(),
        )
        .with_clock(clock.clone());

        Self {
            session,
            fetcher,
            backend,
            view,
            clock,
        }
    }

    /// Moves the clock past the duplicate-trigger window.
    pub fn tick(&self) {
        self.clock.advance(Duration::from_millis(5));
    }
}
