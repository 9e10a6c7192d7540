//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use docsite_site::PageComposer;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page pipeline, run once per request.
    pub(crate) composer: Arc<PageComposer>,
    /// Enable verbose output (log every render).
    pub(crate) verbose: bool,
    /// Application version, mixed into the `ETag`.
    pub(crate) version: String,
}
