//! Search delay policy.
//!
//! The search library waits for a short delay before searching so a burst of
//! keystrokes only costs one search. Bigger indexes get a longer delay, and a
//! very big compact index turns search-as-you-type off entirely.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::config::SearchConfig;
use crate::fetch::ArtifactFetcher;

/// How keystrokes in the search box are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingMode {
    /// Search on every keystroke
    Live,
    /// Only search when the user presses Enter
    EnterToSearch,
}

/// Computes search delays and the typing mode from index sizes.
pub struct DelayPolicy {
    fetcher: Rc<dyn ArtifactFetcher>,
    config: Rc<SearchConfig>,
}

impl DelayPolicy {
    pub fn new(fetcher: Rc<dyn ArtifactFetcher>, config: Rc<SearchConfig>) -> Self {
        Self { fetcher, config }
    }

    /// Approximate size of the artifact at `path` in megabytes.
    ///
    /// Returns 0 when the artifact cannot be fetched: an unknown size is not
    /// a reason to refuse searching.
    pub async fn index_size(&self, path: &str) -> f64 {
        match self.fetcher.fetch_text(path).await {
            Ok(text) => text.len() as f64 / 1_000_000.0,
            Err(e) => {
                debug!("Could not measure {}: {}", path, e);
                0.0
            }
        }
    }

    /// Delay to hand to the search library when searching `index_path`.
    pub async fn search_delay(&self, index_path: &str) -> Duration {
        let size = self.index_size(index_path).await;
        if size > self.config.increase_delay_index_mb {
            self.config.increased_delay()
        } else {
            self.config.default_delay()
        }
    }

    /// Whether keystrokes should search immediately, based on the compact index size.
    pub async fn typing_mode(&self) -> TypingMode {
        let size = self.index_size(&self.config.paths.compact_index).await;
        if size > self.config.disable_search_as_you_type_index_mb {
            debug!(
                "Compact index is {:.1}MB, search-as-you-type disabled",
                size
            );
            TypingMode::EnterToSearch
        } else {
            TypingMode::Live
        }
    }
}
