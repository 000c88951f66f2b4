//! Route handlers organized by resource.

pub mod notes;
pub mod search;
pub mod system;
pub mod tags;

use axum::Router;

use crate::app_state::AppState;

/// Composes the note, tag, and search-preference routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(notes::routes())
        .merge(tags::routes())
        .merge(search::routes())
}
