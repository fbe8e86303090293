//! [`SearchView`] over Dioxus signals.

use dioxus::prelude::*;
use docsearch_core::{DocumentFragment, SearchView};

/// Page state the search session writes to. Components read the signals.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalView {
    pub status: Signal<String>,
    pub warning: Signal<String>,
    pub results: Signal<Vec<DocumentFragment>>,
    pub results_visible: Signal<bool>,
    pub clear_button_visible: Signal<bool>,
    pub help_visible: Signal<bool>,
}

/// Creates the view signals in the calling component's scope.
pub fn use_signal_view() -> SignalView {
    SignalView {
        status: use_signal(String::new),
        warning: use_signal(String::new),
        results: use_signal(Vec::new),
        results_visible: use_signal(|| false),
        clear_button_visible: use_signal(|| false),
        help_visible: use_signal(|| false),
    }
}

impl SearchView for SignalView {
    fn set_status(&self, message: &str) {
        let mut status = self.status;
        status.set(message.to_string());
    }

    fn set_warning(&self, message: &str) {
        let mut warning = self.warning;
        warning.set(message.to_string());
    }

    fn set_results(&self, fragments: Vec<DocumentFragment>) {
        let mut results = self.results;
        results.set(fragments);
    }

    fn clear_results(&self) {
        let mut results = self.results;
        results.write().clear();
    }

    fn set_results_visible(&self, visible: bool) {
        let mut results_visible = self.results_visible;
        results_visible.set(visible);
    }

    fn set_clear_button_visible(&self, visible: bool) {
        let mut clear_button_visible = self.clear_button_visible;
        clear_button_visible.set(visible);
    }

    fn set_help_visible(&self, visible: bool) {
        let mut help_visible = self.help_visible;
        help_visible.set(visible);
    }
}
