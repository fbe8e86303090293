//! UI components for the documentation search box.
//!
//! # Context Providers
//!
//! [`App`] creates the [`SearchSession`] once and shares it, together with the
//! signals it writes to, through Dioxus context:
//!
//! ```ignore
//! let session = use_search_session();
//! let view = use_view();
//! spawn(async move { session.on_enter().await; });
//! ```

pub mod search;

use std::rc::Rc;

use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use docsearch_core::{ArtifactFetcher, CachedFetcher, ListingResolver, SearchSession};

use crate::backend::PlatformBackend;
use crate::config::load_config;
use crate::fetch::SiteFetcher;
use crate::page_events::{bind_document, WIDGET_ID};
use crate::view::{use_signal_view, SignalView};

pub use search::{ResultsPanel, SearchBox};

/// Shared search session.
pub fn use_search_session() -> Rc<SearchSession> {
    use_context::<Rc<SearchSession>>()
}

/// Signals the session writes to.
pub fn use_view() -> SignalView {
    use_context::<SignalView>()
}

/// Wires the session to the host's fetcher, search library and the view.
fn build_session(view: SignalView) -> SearchSession {
    let config = load_config();
    let fetcher: Rc<dyn ArtifactFetcher> =
        Rc::new(CachedFetcher::new(Rc::new(SiteFetcher::for_host())));
    let resolver = Rc::new(ListingResolver::new(
        Rc::clone(&fetcher),
        config.paths.document_listing.clone(),
    ));

    info!("Search session ready");
    SearchSession::new(
        config,
        fetcher,
        Rc::new(PlatformBackend::new()),
        resolver,
        Rc::new(view),
    )
}

/// Search box with its results panel.
///
/// Clicks anywhere outside the widget and Escape anywhere on the page close
/// the results (see [`crate::page_events`]).
#[component]
pub fn App() -> Element {
    let view = use_signal_view();
    let session = use_hook(|| Rc::new(build_session(view)));

    use_context_provider(|| view);
    use_context_provider(|| Rc::clone(&session));

    use_hook({
        let session = Rc::clone(&session);
        move || bind_document(session)
    });

    rsx! {
        div { id: WIDGET_ID, class: "ds-search-container",
            SearchBox {}
            ResultsPanel {}
        }
    }
}
