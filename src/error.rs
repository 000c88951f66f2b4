//! Application error types with HTTP status code mapping.
//!
//! [`AppError`] is the central error type. Each variant maps to an HTTP
//! status code; the response body is a small HTML page since every client
//! of this service is a browser.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::domain::{NoteId, TagId};
use crate::views;

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               |
/// |------------------|---------------------------|
/// | `InvalidRequest` | 400 Bad Request           |
/// | `*NotFound`      | 404 Not Found             |
/// | `Database`       | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Note with the given id does not exist.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// Tag with the given id does not exist.
    #[error("tag not found: {0}")]
    TagNotFound(TagId),

    /// No route serves the requested path.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Missing or malformed form field or path segment.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Store failure; the surrounding transaction has been rolled back.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at startup.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NoteNotFound(_) | Self::TagNotFound(_) | Self::PageNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Database(_) | Self::Migration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        // Store details stay in the log.
        let message = match &self {
            Self::Database(_) | Self::Migration(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Html(views::error_page(status, &message))).into_response()
    }
}

/// Convenience alias used throughout handlers and services.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::NoteNotFound(NoteId::new(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::TagNotFound(TagId::new(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::PageNotFound("/nowhere/".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidRequest("tag_id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_details() {
        let error = AppError::Database(sqlx::Error::Protocol("secret path /var/db".into()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
