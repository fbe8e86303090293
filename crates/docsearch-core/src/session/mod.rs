//! Search session: orchestration of one search box.
//!
//! A [`SearchSession`] owns everything that lives as long as the page: the
//! collaborators, the readiness gate, the long-search timer and the record of
//! the last accepted request. UI events call into it; it writes back through
//! [`SearchView`].
//!
//! # Staleness
//!
//! Every accepted search gets a [`RequestStamp`] whose `seq` comes from a
//! counter that only moves forward. Each await point in a search is followed
//! by a comparison against the latest `seq`; once a newer request was accepted
//! (or the search was stopped) the older continuation returns
//! [`SearchOutcome::Stale`] without touching the view. In-flight library work
//! is not necessarily aborted, its results are just ignored.
//!
//! # Examples
//!
//! ```ignore
//! let session = SearchSession::new(config, fetcher, backend, resolver, view);
//!
//! // Bound to the input event
//! session.on_input("reactor".to_string()).await;
//!
//! // Bound to Enter
//! session.on_enter().await;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either};
use futures::pin_mut;
use tracing::{debug, error, info};

use crate::backend::{IndexArtifact, RequestStamp, SearchBackend, SearchRequest};
use crate::config::SearchConfig;
use crate::delay::{DelayPolicy, TypingMode};
use crate::documents::DocumentResolver;
use crate::error::SearchError;
use crate::fetch::ArtifactFetcher;
use crate::platform::{self, Clock, InstantClock};
use crate::readiness::ReadinessGate;
use crate::render::{self, no_results_status};
use crate::view::{messages, LongSearchTimer, SearchView};


/// What a call into the session ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Duplicate trigger, nothing happened
    Ignored,
    /// Empty query, the UI was reset
    Cleared,
    /// The host cannot run searches
    Unsupported,
    /// Search-as-you-type is off; the user was asked to press Enter
    Deferred,
    /// Nothing to search (e.g. toggling an option with an empty box)
    Idle,
    /// A newer request superseded this one; its results were dropped
    Stale,
    /// The query matched nothing
    NoResults,
    /// Results were rendered
    Rendered { total: usize, public: usize },
    /// The search failed and the failure was reported
    Failed(SearchError),
}

/// Last accepted trigger, for the duplicate filter.
#[derive(Debug, Clone)]
struct Trigger {
    started_at: Duration,
    query: String,
}

/// Orchestrates searches for one search box.
pub struct SearchSession {
    config: Rc<SearchConfig>,
    view: Rc<dyn SearchView>,
    backend: Rc<dyn SearchBackend>,
    resolver: Rc<dyn DocumentResolver>,
    clock: Rc<dyn Clock>,
    delay: DelayPolicy,
    readiness: ReadinessGate,
    long_search: LongSearchTimer,
    /// Latest accepted request; bumped again when a search is stopped
    latest_seq: Cell<u64>,
    last_trigger: RefCell<Option<Trigger>>,
    input: RefCell<String>,
    search_docstrings: Cell<bool>,
    help_visible: Cell<bool>,
}

impl SearchSession {
    pub fn new(
        config: SearchConfig,
        fetcher: Rc<dyn ArtifactFetcher>,
        backend: Rc<dyn SearchBackend>,
        resolver: Rc<dyn DocumentResolver>,
        view: Rc<dyn SearchView>,
    ) -> Self {
        let config = Rc::new(config);
        Self {
            delay: DelayPolicy::new(Rc::clone(&fetcher), Rc::clone(&config)),
            readiness: ReadinessGate::new(fetcher, config.paths.clone()),
            config,
            view,
            backend,
            resolver,
            clock: Rc::new(InstantClock::new()),
            long_search: LongSearchTimer::new(),
            latest_seq: Cell::new(0),
            last_trigger: RefCell::new(None),
            input: RefCell::new(String::new()),
            search_docstrings: Cell::new(false),
            help_visible: Cell::new(false),
        }
    }

    /// Replaces the monotonic clock.
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Current contents of the search box.
    pub fn input(&self) -> String {
        self.input.borrow().clone()
    }

    pub fn search_docstrings(&self) -> bool {
        self.search_docstrings.get()
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible.get()
    }

    // =========================================================================
    // Orchestration
    // =========================================================================

    /// Starts (or restarts) a search for `query`.
    ///
    /// `skip_delay` searches right away instead of letting the library wait
    /// for more keystrokes (used for Enter and option toggles).
    pub async fn launch_search(&self, query: &str, skip_delay: bool) -> SearchOutcome {
        let started_at = self.clock.now();
        if self.is_duplicate_trigger(query, started_at) {
            debug!("Ignoring duplicate trigger for '{}'", query);
            return SearchOutcome::Ignored;
        }

        // The box text drives both the clear button and the results container
        *self.input.borrow_mut() = query.to_string();
        self.view.set_clear_button_visible(!query.is_empty());
        let stamp = self.accept(query, started_at);

        if query.is_empty() {
            self.stop_searching();
            return SearchOutcome::Cleared;
        }

        if !self.backend.is_supported() {
            self.view.set_status(messages::UNSUPPORTED);
            return SearchOutcome::Unsupported;
        }

        self.view.set_warning("");
        self.reset_result_list();
        self.show_results();
        self.view.set_status(messages::PREPARING);

        let index = IndexArtifact::for_docstrings(self.search_docstrings.get());
        let fields = self.config.fields(self.search_docstrings.get());
        let token = self.long_search.restart();

        let search = self.run_search(stamp, query, index, fields, skip_delay);
        let notice = self.long_search_notice(token);
        pin_mut!(search, notice);

        let result = match future::select(search, notice).await {
            Either::Left((result, _)) => result,
            Either::Right(((), search)) => search.await,
        };

        match result {
            Ok(outcome) => outcome,
            Err(_) if self.is_stale(stamp) => SearchOutcome::Stale,
            Err(err) => {
                self.report_error(&err);
                SearchOutcome::Failed(err)
            }
        }
    }

    async fn run_search(
        &self,
        stamp: RequestStamp,
        query: &str,
        index: IndexArtifact,
        fields: Vec<String>,
        skip_delay: bool,
    ) -> Result<SearchOutcome, SearchError> {
        let index_path = index.path(&self.config.paths).to_string();

        let (delay, ready) = futures::join!(
            self.delay.search_delay(&index_path),
            self.readiness.ensure_ready()
        );
        if !ready.is_complete() {
            debug!("Searching with missing artifacts: {:?}", ready.missing);
        }
        if self.is_stale(stamp) {
            return Ok(SearchOutcome::Stale);
        }

        self.view.set_status(messages::SEARCHING);
        let request = SearchRequest {
            query: query.to_string(),
            stamp,
            index,
            index_path,
            library_path: self.config.paths.search_library.clone(),
            fields,
            delay: if skip_delay { Duration::ZERO } else { delay },
        };

        let ranked = self.backend.search(&request).await;
        if self.is_stale(stamp) {
            return Ok(SearchOutcome::Stale);
        }

        let ranked = ranked?.ok_or(SearchError::NoData)?;
        if ranked.is_empty() {
            self.view.set_status(&no_results_status(query));
            self.long_search.reset();
            return Ok(SearchOutcome::NoResults);
        }

        self.view.set_status(messages::RESOLVING);
        let fragments = self.resolver.resolve(&ranked).await;
        if self.is_stale(stamp) {
            return Ok(SearchOutcome::Stale);
        }
        let fragments = fragments?;

        self.long_search.reset();
        let summary = render::render(
            self.view.as_ref(),
            &self.config,
            query,
            fragments,
            &ranked,
        );

        let elapsed = self.clock.now().saturating_sub(stamp.started_at);
        info!(
            "Search for \"{}\" took {:.3} seconds",
            query,
            elapsed.as_secs_f64()
        );

        Ok(SearchOutcome::Rendered {
            total: summary.total,
            public: summary.public,
        })
    }

    /// Writes the long-search warning once the threshold elapses, unless the
    /// timer was reset or restarted meanwhile. Never completes.
    async fn long_search_notice(&self, token: u64) {
        platform::sleep(self.config.long_search_notice()).await;
        if self.long_search.is_armed(token) {
            self.view.set_warning(messages::LONG_SEARCH);
        }
        future::pending::<()>().await
    }

    fn report_error(&self, err: &SearchError) {
        error!("Search failed: {:?}", err);
        self.long_search.reset();
        match err.user_message() {
            // Most likely a query parser error, worth showing as is
            Some(message) => {
                self.view.set_status("");
                self.view.set_warning(message);
            }
            None => {
                self.view.set_status(messages::SOMETHING_WENT_WRONG);
                self.view.set_warning(messages::SEE_CONSOLE);
            }
        }
    }

    fn is_duplicate_trigger(&self, query: &str, started_at: Duration) -> bool {
        self.last_trigger.borrow().as_ref().is_some_and(|last| {
            started_at.saturating_sub(last.started_at) < self.config.duplicate_trigger_window()
                && last.query == query
        })
    }

    fn accept(&self, query: &str, started_at: Duration) -> RequestStamp {
        *self.last_trigger.borrow_mut() = Some(Trigger {
            started_at,
            query: query.to_string(),
        });
        RequestStamp {
            started_at,
            seq: self.bump_seq(),
        }
    }

    fn bump_seq(&self) -> u64 {
        let seq = self.latest_seq.get() + 1;
        self.latest_seq.set(seq);
        seq
    }

    fn is_stale(&self, stamp: RequestStamp) -> bool {
        stamp.seq != self.latest_seq.get()
    }

    // =========================================================================
    // Search-as-you-type
    // =========================================================================

    /// Searches the current input, unless the compact index is too large for
    /// searching on every keystroke.
    pub async fn search_as_you_type(&self) -> SearchOutcome {
        if !self.input.borrow().is_empty() {
            self.show_results();
        }

        let mode = self.delay.typing_mode().await;
        let query = self.input();

        match mode {
            TypingMode::Live => self.launch_search(&query, false).await,
            // Nothing typed: run the cycle anyway, it resets the UI
            TypingMode::EnterToSearch if query.is_empty() => {
                self.launch_search(&query, false).await
            }
            TypingMode::EnterToSearch => {
                platform::yield_now().await;
                self.cancel_in_flight();
                self.reset_result_list();
                self.view.set_status(messages::PRESS_ENTER);
                SearchOutcome::Deferred
            }
        }
    }

    // =========================================================================
    // Stopping
    // =========================================================================

    /// Resets the UI and drops any in-flight search.
    pub fn stop_searching(&self) {
        self.hide_results();
        self.reset_result_list();
        self.view.set_warning("");
        self.view.set_status("");
        self.cancel_in_flight();
    }

    /// Stops searching and empties the search box.
    pub fn clear_search(&self) {
        self.stop_searching();
        self.input.borrow_mut().clear();
        self.view.set_clear_button_visible(false);
    }

    fn cancel_in_flight(&self) {
        self.bump_seq();
        self.backend.abort();
        self.readiness.invalidate();
    }

    fn reset_result_list(&self) {
        self.long_search.reset();
        self.view.clear_results();
    }

    fn show_results(&self) {
        self.view.set_results_visible(true);
        self.view
            .set_clear_button_visible(!self.input.borrow().is_empty());
    }

    fn hide_results(&self) {
        self.view.set_results_visible(false);
        self.set_help(false);
    }

    fn set_help(&self, visible: bool) {
        self.help_visible.set(visible);
        self.view.set_help_visible(visible);
    }

    // =========================================================================
    // UI events
    // =========================================================================

    /// The search box text changed.
    pub async fn on_input(&self, text: String) -> SearchOutcome {
        *self.input.borrow_mut() = text;
        // Let the rest of the event dispatch finish first
        platform::yield_now().await;
        self.search_as_you_type().await
    }

    /// Enter was pressed in the search box.
    pub async fn on_enter(&self) -> SearchOutcome {
        let query = self.input();
        self.launch_search(&query, true).await
    }

    /// The search box gained focus: warm the artifact cache before the user
    /// finishes typing.
    pub async fn on_focus(&self) {
        let ready = self.readiness.refresh().await;
        if !ready.is_complete() {
            debug!("Prefetch left artifacts missing: {:?}", ready.missing);
        }
    }

    /// Escape was pressed anywhere on the page.
    pub fn on_escape(&self) {
        self.hide_results();
    }

    /// A click landed outside the search box, results and help button.
    pub fn on_click_outside(&self) {
        self.hide_results();
    }

    /// The search box itself was clicked.
    pub fn on_search_box_click(&self) {
        if !self.input.borrow().is_empty() {
            self.show_results();
        }
    }

    /// The "search in docstrings" option changed.
    pub async fn toggle_docstrings(&self, enabled: bool) -> SearchOutcome {
        self.search_docstrings.set(enabled);
        let query = self.input();
        if query.is_empty() {
            return SearchOutcome::Idle;
        }
        self.launch_search(&query, true).await
    }

    /// The help button was clicked.
    pub fn toggle_help(&self) {
        let visible = !self.help_visible.get();
        self.set_help(visible);
        if !visible && self.input.borrow().is_empty() {
            self.view.set_results_visible(false);
        } else {
            self.show_results();
        }
    }
}
