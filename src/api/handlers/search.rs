//! Search and sort preference handlers.
//!
//! Each handler loads the session preferences, applies one change, saves
//! them back, and redirects to the note list.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Extension, Form, Router};

use crate::api::Found;
use crate::api::forms::{SearchTextForm, SortForm, TagIdForm, parse_form, parse_path};
use crate::app_state::AppState;
use crate::domain::{Preferences, TagId};
use crate::error::AppResult;
use crate::session::SessionId;

async fn update_preferences(
    state: &AppState,
    session: SessionId,
    apply: impl FnOnce(&mut Preferences) + Send,
) -> AppResult<Found> {
    let mut prefs = state.sessions.load(session).await?;
    apply(&mut prefs);
    state.sessions.save(session, prefs).await?;
    Ok(Found::to("/"))
}

/// `POST /addSearchTag/` — Add a tag to the search filter.
///
/// # Errors
///
/// Returns 400 on a missing or non-numeric `tag_id`.
pub async fn add_search_tag(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Form<TagIdForm>, FormRejection>,
) -> AppResult<Found> {
    let form = parse_form(form)?;
    update_preferences(&state, session, |prefs| {
        prefs.add_search_tag(form.tag_id);
    })
    .await
}

/// `GET|POST /deleteSearchTag/{tag_id}/` — Remove a tag from the filter.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] if the session store fails.
pub async fn delete_search_tag(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    path: Result<Path<TagId>, PathRejection>,
) -> AppResult<Found> {
    let tag_id = parse_path(path)?;
    update_preferences(&state, session, |prefs| {
        prefs.remove_search_tag(tag_id);
    })
    .await
}

/// `POST /setSearchText/` — Replace the search text.
///
/// # Errors
///
/// Returns 400 on a missing `text` field.
pub async fn set_search_text(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Form<SearchTextForm>, FormRejection>,
) -> AppResult<Found> {
    let form = parse_form(form)?;
    update_preferences(&state, session, |prefs| prefs.set_search_text(form.text)).await
}

/// `POST /setSortParams/` — Set both sort flags from the checkboxes.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] if the session store fails.
pub async fn set_sort_params(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    form: Result<Form<SortForm>, FormRejection>,
) -> AppResult<Found> {
    let (by_name, by_time) = parse_form(form)?.flags();
    update_preferences(&state, session, |prefs| prefs.set_sort(by_name, by_time)).await
}

/// Search preference routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/addSearchTag/", post(add_search_tag))
        .route(
            "/deleteSearchTag/{tag_id}/",
            get(delete_search_tag).post(delete_search_tag),
        )
        .route("/setSearchText/", post(set_search_text))
        .route("/setSortParams/", post(set_sort_params))
}
