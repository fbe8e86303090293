//! Docsearch - search box for statically generated API documentation.
//!
//! The Dioxus front end around [`docsearch_core`]: it binds the page's search
//! box to a [`SearchSession`](docsearch_core::SearchSession), fetches the
//! site's artifacts and hands queries to the lunr script shipped with the
//! documentation.
//!
//! # Platform Support
//!
//! - **Web (WASM)**: artifacts over `fetch()`, searches in lunr's Web Worker
//! - **Native**: artifacts from a site directory; no search library, so the
//!   box reports that searching is unsupported

// Enforce memory safety: forbid all unsafe code
#![forbid(unsafe_code)]

pub mod backend;
pub mod components;
pub mod config;
pub mod fetch;
pub mod page_events;
pub mod view;
