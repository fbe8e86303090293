//! Bridge to the lunr search library.
//!
//! The page ships a small script exposing three globals:
//!
//! - `lunrSearch(query, indexURL, fields, lunrJsURL, delay)` returns a
//!   promise of `[{ref, score}, ...]`, run in a Web Worker
//! - `abortSearch()` terminates the worker's current search
//! - `restartSearchWorker()` spawns a fresh worker when the old one was killed
//!
//! Native hosts have no search library; [`PlatformBackend`] reports itself as
//! unsupported there.

use docsearch_core::{RankedResult, SearchBackend, SearchError, SearchRequest};

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{debug, warn};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
pub type PlatformBackend = LunrBackend;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBackend = UnavailableBackend;

/// Parses the JSON text of a library result list.
pub fn parse_ranked(json: &str) -> Result<Vec<RankedResult>, SearchError> {
    serde_json::from_str(json)
        .map_err(|e| SearchError::Backend(format!("Unexpected search results: {}", e)))
}

// =============================================================================
// Web
// =============================================================================

/// [`SearchBackend`] calling the page's `lunrSearch` global.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone)]
pub struct LunrBackend;

#[cfg(target_arch = "wasm32")]
impl LunrBackend {
    pub fn new() -> Self {
        Self
    }

    fn global_function(name: &str) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }

    /// Readable message of a rejected search, if the rejection carries one.
    fn rejection_message(err: &JsValue) -> Option<String> {
        if let Some(message) = err.as_string() {
            return Some(message);
        }
        js_sys::Reflect::get(err, &JsValue::from_str("message"))
            .ok()?
            .as_string()
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl SearchBackend for LunrBackend {
    fn is_supported(&self) -> bool {
        js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Worker")).unwrap_or(false)
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<Vec<RankedResult>>, SearchError> {
        use js_sys::{Array, Promise, JSON};
        use wasm_bindgen_futures::JsFuture;

        let lunr_search = Self::global_function("lunrSearch")
            .ok_or_else(|| SearchError::Backend("lunrSearch is not defined".to_string()))?;

        let fields: Array = request
            .fields
            .iter()
            .map(|field| JsValue::from_str(field))
            .collect();
        let args = Array::of5(
            &JsValue::from_str(&request.query),
            &JsValue::from_str(&request.index_path),
            &fields,
            &JsValue::from_str(&request.library_path),
            &JsValue::from_f64(request.delay.as_millis() as f64),
        );

        debug!(
            "lunrSearch '{}' on {} (delay {}ms)",
            request.query,
            request.index_path,
            request.delay.as_millis()
        );

        let promise = lunr_search
            .apply(&JsValue::NULL, &args)
            .map_err(|e| SearchError::Backend(format!("lunrSearch call failed: {:?}", e)))?;

        let value = match JsFuture::from(Promise::resolve(&promise)).await {
            Ok(value) => value,
            Err(err) => {
                return Err(match Self::rejection_message(&err) {
                    Some(message) => SearchError::Query(message),
                    None => SearchError::Backend(format!("{:?}", err)),
                });
            }
        };

        if !value.is_truthy() {
            return Ok(None);
        }

        let json: String = JSON::stringify(&value)
            .map_err(|e| SearchError::Backend(format!("Unserializable results: {:?}", e)))?
            .into();
        parse_ranked(&json).map(Some)
    }

    fn abort(&self) {
        for name in ["abortSearch", "restartSearchWorker"] {
            match Self::global_function(name) {
                Some(function) => {
                    if let Err(e) = function.call0(&JsValue::NULL) {
                        warn!("{} failed: {:?}", name, e);
                    }
                }
                None => debug!("{} is not defined", name),
            }
        }
    }
}

// =============================================================================
// Native
// =============================================================================

/// Backend for hosts without a search library.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone)]
pub struct UnavailableBackend;

#[cfg(not(target_arch = "wasm32"))]
impl UnavailableBackend {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl SearchBackend for UnavailableBackend {
    fn is_supported(&self) -> bool {
        false
    }

    async fn search(
        &self,
        _request: &SearchRequest,
    ) -> Result<Option<Vec<RankedResult>>, SearchError> {
        Err(SearchError::Backend(
            "No search library on this host".to_string(),
        ))
    }
}
