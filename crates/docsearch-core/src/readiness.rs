//! Readiness gate for search artifacts.
//!
//! Before the first search every artifact must be downloaded (and therefore
//! cached). The gate keeps one shared future covering all four downloads;
//! callers arriving while it is pending simply wait on the same future, so at
//! most one set of downloads is ever in flight.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{join_all, FutureExt, LocalBoxFuture, Shared};
use tracing::{debug, warn};

use crate::config::ArtifactPaths;
use crate::fetch::{Artifact, ArtifactFetcher};

/// Outcome of warming the artifact cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyArtifacts {
    /// Artifacts that failed to download
    pub missing: Vec<Artifact>,
}

impl ReadyArtifacts {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Shared, cloneable handle on the pending or completed downloads.
pub type Readiness = Shared<LocalBoxFuture<'static, ReadyArtifacts>>;

/// Lazily created, explicitly invalidated cache of artifact downloads.
pub struct ReadinessGate {
    fetcher: Rc<dyn ArtifactFetcher>,
    paths: ArtifactPaths,
    pending: RefCell<Option<Readiness>>,
}

impl ReadinessGate {
    pub fn new(fetcher: Rc<dyn ArtifactFetcher>, paths: ArtifactPaths) -> Self {
        Self {
            fetcher,
            paths,
            pending: RefCell::new(None),
        }
    }

    /// Returns the current readiness future, starting the downloads if unset.
    pub fn ensure_ready(&self) -> Readiness {
        self.pending
            .borrow_mut()
            .get_or_insert_with(|| self.start())
            .clone()
    }

    /// Forgets the current readiness future. The next call starts over.
    pub fn invalidate(&self) {
        if self.pending.borrow_mut().take().is_some() {
            debug!("Readiness gate invalidated");
        }
    }

    /// Starts a fresh set of downloads, e.g. when the search box gains focus.
    pub fn refresh(&self) -> Readiness {
        self.invalidate();
        self.ensure_ready()
    }

    /// Whether a readiness future currently exists.
    pub fn is_set(&self) -> bool {
        self.pending.borrow().is_some()
    }

    fn start(&self) -> Readiness {
        debug!("Warming search artifacts");
        let downloads = Artifact::ALL.into_iter().map(|artifact| {
            let fetcher = Rc::clone(&self.fetcher);
            let path = artifact.path(&self.paths).to_string();
            async move {
                let result = fetcher.fetch_text(&path).await;
                if let Err(e) = &result {
                    warn!("Failed to fetch {}: {}", path, e);
                }
                (artifact, result.is_ok())
            }
        });

        join_all(downloads)
            .map(|results| ReadyArtifacts {
                missing: results
                    .into_iter()
                    .filter(|(_, ok)| !ok)
                    .map(|(artifact, _)| artifact)
                    .collect(),
            })
            .boxed_local()
            .shared()
    }
}
