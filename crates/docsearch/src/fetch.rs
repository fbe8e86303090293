//! Artifact fetching for the browser and for native hosts.
//!
//! Artifacts sit next to the documentation pages, so paths are resolved
//! against a site base: the page's own directory on the web, a directory on
//! disk natively.

use std::rc::Rc;

use dioxus::logger::tracing::debug;
use docsearch_core::{ArtifactFetcher, FetchError};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Environment variable naming the site directory on native hosts.
pub const SITE_DIR_ENV: &str = "DOCSEARCH_SITE_DIR";

/// Fetches artifacts with `fetch()` (web) or from the filesystem (native).
///
/// # Platform-Specific Behavior
///
/// - **Web**: Uses the global `fetch()` function. An empty base keeps paths
///   relative, so the browser resolves them against the current page.
/// - **Native**: Reads files below the base directory.
#[derive(Debug, Clone, Default)]
pub struct SiteFetcher {
    base: String,
}

impl SiteFetcher {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Fetcher for the current host: page-relative on the web, the
    /// [`SITE_DIR_ENV`] directory (or the working directory) natively.
    pub fn for_host() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(std::env::var(SITE_DIR_ENV).unwrap_or_else(|_| ".".to_string()))
        }
    }

    /// Full location of `path` below the base.
    pub fn resolve(&self, path: &str) -> String {
        join_base_path(&self.base, path)
    }
}

#[async_trait::async_trait(?Send)]
impl ArtifactFetcher for SiteFetcher {
    async fn fetch_text(&self, path: &str) -> Result<Rc<str>, FetchError> {
        let location = self.resolve(path);

        #[cfg(target_arch = "wasm32")]
        {
            fetch_text_web(&location).await
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            fetch_text_native(&location).await
        }
    }
}

/// Joins `base` and `path`, leaving absolute URLs untouched.
fn join_base_path(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with("http://") || path.starts_with("https://") || base.is_empty() {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if path.starts_with(&format!("{}/", base)) && base != "." {
        return path.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Web implementation: HTTP fetch
#[cfg(target_arch = "wasm32")]
async fn fetch_text_web(url: &str) -> Result<Rc<str>, FetchError> {
    use js_sys::{Function, Promise, Reflect};
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;

    let global = js_sys::global();
    let fetch_fn = Reflect::get(&global, &JsValue::from_str("fetch"))
        .map_err(|_| FetchError::Unavailable("fetch API unavailable".to_string()))?
        .dyn_into::<Function>()
        .map_err(|_| FetchError::Unavailable("fetch is not callable".to_string()))?;

    debug!("Fetching {}", url);

    let promise = fetch_fn
        .call1(&global, &JsValue::from_str(url))
        .map_err(|e| FetchError::Unavailable(format!("Fetch call failed: {:?}", e)))?;

    let resp_value = JsFuture::from(Promise::from(promise))
        .await
        .map_err(|e| FetchError::Unavailable(format!("Fetch failed: {:?} ({})", e, url)))?;

    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| FetchError::InvalidBody("Failed to cast to Response".to_string()))?;

    if resp.status() == 404 {
        return Err(FetchError::NotFound(url.to_string()));
    }
    if !resp.ok() {
        return Err(FetchError::Http {
            status: resp.status(),
            path: url.to_string(),
        });
    }

    let text = JsFuture::from(
        resp.text()
            .map_err(|e| FetchError::InvalidBody(format!("Failed to read body: {:?}", e)))?,
    )
    .await
    .map_err(|e| FetchError::InvalidBody(format!("Failed to await body: {:?}", e)))?;

    let text = text
        .as_string()
        .ok_or_else(|| FetchError::InvalidBody(format!("Body of {} is not text", url)))?;

    debug!(
        "Fetched {} ({:.2}MB)",
        url,
        text.len() as f64 / 1_000_000.0
    );
    Ok(Rc::from(text))
}

/// Native implementation: filesystem read
#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text_native(path: &str) -> Result<Rc<str>, FetchError> {
    debug!("Reading {}", path);

    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Rc::from(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FetchError::NotFound(path.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            Err(FetchError::InvalidBody(format!("{}: {}", path, e)))
        }
        Err(e) => Err(FetchError::Unavailable(format!("{}: {}", path, e))),
    }
}
