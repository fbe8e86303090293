//! Search configuration.
//!
//! The constants below are the production defaults. [`SearchConfig`] bundles
//! them into a value that pages can partially override with JSON, so every
//! threshold stays tunable without a rebuild.
//!
//! # Usage
//!
//! ```
//! use docsearch_core::config::{SearchConfig, DEFAULT_SEARCH_DELAY_MS};
//!
//! let config = SearchConfig::from_json(r#"{ "increased_delay_ms": 300 }"#).unwrap();
//! assert_eq!(config.increased_delay_ms, 300);
//! assert_eq!(config.default_delay_ms, DEFAULT_SEARCH_DELAY_MS);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Search-as-you-type
// =============================================================================

/// Delay handed to the search library before it starts searching.
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 100;

/// Delay used once the index is large enough that typing several letters
/// quickly would otherwise start several expensive searches.
pub const INCREASED_SEARCH_DELAY_MS: u64 = 200;

/// Index size (MB) above which [`INCREASED_SEARCH_DELAY_MS`] applies.
pub const INCREASE_DELAY_INDEX_MB: f64 = 10.0;

/// Compact index size (MB) above which searching only happens on Enter.
pub const DISABLE_SEARCH_AS_YOU_TYPE_INDEX_MB: f64 = 20.0;

/// Seconds before the "taking longer than usual" notice appears.
pub const LONG_SEARCH_NOTICE_SECS: u64 = 10;

/// Two triggers with the same query closer than this are one trigger.
///
/// Some input methods fire the input event twice for a single edit.
pub const DUPLICATE_TRIGGER_WINDOW_MICROS: u64 = 1_000;

// =============================================================================
// Result warnings
// =============================================================================

/// Top scores at or below this are not considered great matches.
pub const LOW_SCORE_THRESHOLD: f64 = 5.0;

/// Result counts above this trigger the "lot of results" warning.
pub const MANY_RESULTS_THRESHOLD: usize = 500;

// =============================================================================
// Artifacts
// =============================================================================

pub const DOCUMENT_LISTING_PATH: &str = "all-documents.html";
pub const COMPACT_INDEX_PATH: &str = "searchindex.json";
pub const FULL_INDEX_PATH: &str = "fullsearchindex.json";
pub const SEARCH_LIBRARY_PATH: &str = "lunr.js";

/// Fields searched by default.
pub const BASE_FIELDS: [&str; 3] = ["name", "names", "qname"];

/// Extra field searched when docstring search is enabled.
pub const DOCSTRING_FIELD: &str = "docstring";

/// Relative paths of the static artifacts produced by the site build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub document_listing: String,
    pub compact_index: String,
    pub full_index: String,
    pub search_library: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            document_listing: DOCUMENT_LISTING_PATH.to_string(),
            compact_index: COMPACT_INDEX_PATH.to_string(),
            full_index: FULL_INDEX_PATH.to_string(),
            search_library: SEARCH_LIBRARY_PATH.to_string(),
        }
    }
}

/// Tunable search behaviour. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_delay_ms: u64,
    pub increased_delay_ms: u64,
    pub increase_delay_index_mb: f64,
    pub disable_search_as_you_type_index_mb: f64,
    pub long_search_notice_secs: u64,
    pub duplicate_trigger_window_micros: u64,
    pub low_score_threshold: f64,
    pub many_results_threshold: usize,
    pub paths: ArtifactPaths,
    pub base_fields: Vec<String>,
    pub docstring_field: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            increased_delay_ms: INCREASED_SEARCH_DELAY_MS,
            increase_delay_index_mb: INCREASE_DELAY_INDEX_MB,
            disable_search_as_you_type_index_mb: DISABLE_SEARCH_AS_YOU_TYPE_INDEX_MB,
            long_search_notice_secs: LONG_SEARCH_NOTICE_SECS,
            duplicate_trigger_window_micros: DUPLICATE_TRIGGER_WINDOW_MICROS,
            low_score_threshold: LOW_SCORE_THRESHOLD,
            many_results_threshold: MANY_RESULTS_THRESHOLD,
            paths: ArtifactPaths::default(),
            base_fields: BASE_FIELDS.iter().map(|f| f.to_string()).collect(),
            docstring_field: DOCSTRING_FIELD.to_string(),
        }
    }
}

impl SearchConfig {
    /// Parses a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(self.default_delay_ms)
    }

    pub fn increased_delay(&self) -> Duration {
        Duration::from_millis(self.increased_delay_ms)
    }

    pub fn long_search_notice(&self) -> Duration {
        Duration::from_secs(self.long_search_notice_secs)
    }

    pub fn duplicate_trigger_window(&self) -> Duration {
        Duration::from_micros(self.duplicate_trigger_window_micros)
    }

    /// Ordered field set to search, with or without docstrings.
    pub fn fields(&self, include_docstrings: bool) -> Vec<String> {
        let mut fields = self.base_fields.clone();
        if include_docstrings {
            fields.push(self.docstring_field.clone());
        }
        fields
    }
}
