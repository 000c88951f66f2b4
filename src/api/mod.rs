//! HTTP layer: route handlers, form payloads, and router composition.

pub mod forms;
pub mod handlers;

use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::error::AppError;
use crate::session::session_middleware;

/// Builds the complete application router with session handling and
/// request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes())
        .fallback(add_trailing_slash)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `302 Found` redirect to a canonical view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found(String);

impl Found {
    /// Redirects to `location`.
    #[must_use]
    pub fn to(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(LOCATION, self.0)]).into_response()
    }
}

/// Unmatched paths without a trailing slash get a `308` to the slashed
/// path, keeping method and body. Anything else is a 404 page.
///
/// Paths starting with `//` are never redirected; the `Location` would
/// read as a protocol-relative URL to another host.
async fn add_trailing_slash(uri: Uri) -> Response {
    let path = uri.path();
    if path.ends_with('/') || path.starts_with("//") {
        return AppError::PageNotFound(path.to_string()).into_response();
    }
    let location = match uri.query() {
        Some(query) => format!("{path}/?{query}"),
        None => format!("{path}/"),
    };
    (StatusCode::PERMANENT_REDIRECT, [(LOCATION, location)]).into_response()
}
