//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::NotebookService;
use crate::session::SessionStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Notebook service for all store operations.
    pub notebook: Arc<NotebookService>,
    /// Per-session search and sort preferences.
    pub sessions: Arc<dyn SessionStore>,
    /// Whether the session cookie is marked `Secure`.
    pub cookie_secure: bool,
}
