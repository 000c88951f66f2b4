//! Form payloads submitted by the HTML pages.
//!
//! Required fields that are missing or malformed make the extractor fail;
//! [`parse_form`] and [`parse_path`] turn that failure into a 400 response.

use axum::Form;
use axum::extract::Path;
use axum::extract::rejection::{FormRejection, PathRejection};
use serde::Deserialize;

use crate::domain::TagId;
use crate::error::AppError;

/// `POST /note/{id}/`: full replacement of name and content.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    /// New display name.
    pub name: String,
    /// New content.
    pub content: String,
}

/// Tag create and rename. A missing name behaves like an empty one.
#[derive(Debug, Deserialize)]
pub struct TagNameForm {
    /// Tag label.
    #[serde(default)]
    pub name: String,
}

/// Tag selection for attach and search-filter endpoints.
#[derive(Debug, Deserialize)]
pub struct TagIdForm {
    /// Selected tag.
    pub tag_id: TagId,
}

/// `POST /setSearchText/`.
#[derive(Debug, Deserialize)]
pub struct SearchTextForm {
    /// Replacement search text; empty clears the filter.
    pub text: String,
}

/// `POST /setSortParams/`. Unchecked checkboxes are simply absent.
#[derive(Debug, Default, Deserialize)]
pub struct SortForm {
    /// Present when the sort-by-name box is checked.
    pub sort_by_name: Option<String>,
    /// Present when the sort-by-time box is checked.
    pub sort_by_time: Option<String>,
}

impl SortForm {
    /// Returns `(by_name, by_time)`; a field counts only if non-empty.
    #[must_use]
    pub fn flags(&self) -> (bool, bool) {
        (is_checked(self.sort_by_name.as_deref()), is_checked(self.sort_by_time.as_deref()))
    }
}

fn is_checked(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Unwraps a form extraction, mapping rejections to
/// [`AppError::InvalidRequest`].
///
/// # Errors
///
/// Returns [`AppError::InvalidRequest`] with the rejection text.
pub fn parse_form<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    form.map(|Form(inner)| inner)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

/// Unwraps a path extraction, mapping rejections to
/// [`AppError::InvalidRequest`].
///
/// # Errors
///
/// Returns [`AppError::InvalidRequest`] with the rejection text.
pub fn parse_path<T>(path: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    path.map(|Path(inner)| inner)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_flags_follow_presence() {
        let form = SortForm {
            sort_by_name: Some("on".into()),
            sort_by_time: None,
        };
        assert_eq!(form.flags(), (true, false));
        let form = SortForm {
            sort_by_name: Some(String::new()),
            sort_by_time: Some("y".into()),
        };
        assert_eq!(form.flags(), (false, true));
        assert_eq!(SortForm::default().flags(), (false, false));
    }
}
