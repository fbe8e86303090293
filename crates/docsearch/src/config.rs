//! Loading [`SearchConfig`] overrides from the host.
//!
//! - **Web**: `<meta name="docsearch-config" content="{...}">` in the page
//! - **Native**: the `DOCSEARCH_CONFIG` environment variable
//!
//! Both hold (partial) JSON. Anything unreadable falls back to the defaults.

use dioxus::logger::tracing::{info, warn};
use docsearch_core::SearchConfig;

/// Name of the meta tag carrying configuration overrides.
pub const CONFIG_META_NAME: &str = "docsearch-config";

/// Environment variable carrying configuration overrides on native hosts.
pub const CONFIG_ENV: &str = "DOCSEARCH_CONFIG";

/// Configuration for the current host.
pub fn load_config() -> SearchConfig {
    match host_overrides() {
        Some(json) => parse_or_default(&json),
        None => SearchConfig::default(),
    }
}

/// Parses `json`, logging and falling back to defaults on failure.
pub fn parse_or_default(json: &str) -> SearchConfig {
    match SearchConfig::from_json(json) {
        Ok(config) => {
            info!("Loaded search configuration overrides");
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            SearchConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn host_overrides() -> Option<String> {
    let document = web_sys::window()?.document()?;
    match document.query_selector(&format!("meta[name=\"{}\"]", CONFIG_META_NAME)) {
        Ok(Some(meta)) => meta.get_attribute("content"),
        Ok(None) => None,
        Err(err) => {
            warn!("Failed to read {} meta tag: {:?}", CONFIG_META_NAME, err);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn host_overrides() -> Option<String> {
    std::env::var(CONFIG_ENV).ok()
}
