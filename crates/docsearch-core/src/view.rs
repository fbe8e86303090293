//! Page elements the search session writes to.
//!
//! The session never touches the DOM directly. It reports through
//! [`SearchView`], three independent text channels plus visibility toggles,
//! all last-write-wins.

use std::cell::Cell;

use crate::documents::DocumentFragment;

/// User-facing messages.
pub mod messages {
    /// Shown while the search is being prepared
    pub const PREPARING: &str = "...";
    /// Shown once the search library starts searching
    pub const SEARCHING: &str = "Searching...";
    /// Shown while result rows are being resolved
    pub const RESOLVING: &str = "One sec...";
    pub const PRESS_ENTER: &str = "Press 'Enter' to search.";
    pub const UNSUPPORTED: &str =
        "Cannot search: JavaScript Worker API is not supported in your browser.";
    pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";
    pub const SEE_CONSOLE: &str = "Error: See development console for details.";
    pub const LONG_SEARCH: &str = "This is taking longer than usual... You can keep waiting for \
        the search to complete, or retry the search with other terms.";
    pub const MANY_POOR_RESULTS: &str = "Your search yielded a lot of results! and there aren't \
        many great matches. Maybe try with other terms?";
    pub const POOR_RESULTS: &str = "Unfortunately, it looks like there aren't many great matches \
        for your search. Maybe try with other terms?";
    pub const MANY_RESULTS: &str =
        "Your search yielded a lot of results! Maybe try with other terms?";
}

/// The search UI as seen by the session.
pub trait SearchView {
    /// Replaces the status line.
    fn set_status(&self, message: &str);

    /// Replaces the warning line; an empty message hides the warning box.
    fn set_warning(&self, message: &str);

    /// Replaces the result list, in display order.
    fn set_results(&self, fragments: Vec<DocumentFragment>);

    /// Empties the result list.
    fn clear_results(&self);

    /// Shows or hides the results container.
    fn set_results_visible(&self, visible: bool);

    /// Shows or hides the (X) button of the search box.
    fn set_clear_button_visible(&self, visible: bool);

    /// Shows or hides the search help text.
    fn set_help_visible(&self, visible: bool);
}

/// Cancellable timer for the long-search notice.
///
/// Each restart hands out a new token; a notice only fires if its token is
/// still the armed one when the threshold elapses.
#[derive(Debug, Default)]
pub struct LongSearchTimer {
    token: Cell<u64>,
    armed: Cell<bool>,
}

impl LongSearchTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending notice and arms a new one.
    pub fn restart(&self) -> u64 {
        let token = self.token.get() + 1;
        self.token.set(token);
        self.armed.set(true);
        token
    }

    /// Cancels any pending notice.
    pub fn reset(&self) {
        self.armed.set(false);
        self.token.set(self.token.get() + 1);
    }

    /// Whether the notice for `token` should still fire.
    pub fn is_armed(&self, token: u64) -> bool {
        self.armed.get() && self.token.get() == token
    }
}
