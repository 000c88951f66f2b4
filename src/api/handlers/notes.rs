//! Note handlers: list, view, create, update, delete, tag attach/detach.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Extension, Form, Router};

use crate::api::Found;
use crate::api::forms::{NoteForm, TagIdForm, parse_form, parse_path};
use crate::app_state::AppState;
use crate::domain::{NoteId, TagId};
use crate::error::AppResult;
use crate::session::SessionId;
use crate::views;

/// `GET /` — Notes filtered and sorted by the session preferences.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> AppResult<Html<String>> {
    let prefs = state.sessions.load(session).await?;
    let listing = state.notebook.list_notes(&prefs).await?;
    Ok(Html(views::note_list_page(&listing)))
}

/// `GET /note/{id}/` — Single note. Unknown ids render an empty page.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn show_note(
    State(state): State<AppState>,
    path: Result<Path<NoteId>, PathRejection>,
) -> AppResult<Html<String>> {
    let id = parse_path(path)?;
    let detail = state.notebook.note_detail(id).await?;
    let tags = state.notebook.list_tags().await?;
    Ok(Html(views::note_page(detail.as_ref(), &tags)))
}

/// `POST /note/{id}/` — Replace name and content.
///
/// # Errors
///
/// Returns 400 on missing fields, 404 if the note does not exist.
pub async fn update_note(
    State(state): State<AppState>,
    path: Result<Path<NoteId>, PathRejection>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Found> {
    let id = parse_path(path)?;
    let form = parse_form(form)?;
    state
        .notebook
        .update_note(id, &form.name, &form.content)
        .await?;
    Ok(Found::to(format!("/note/{id}/")))
}

/// `GET|POST /createNote/` — Create a blank note.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn create_note(State(state): State<AppState>) -> AppResult<Found> {
    state.notebook.create_note().await?;
    Ok(Found::to("/"))
}

/// `GET|POST /deleteNote/{id}/` — Delete a note; unknown ids are ignored.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn delete_note(
    State(state): State<AppState>,
    path: Result<Path<NoteId>, PathRejection>,
) -> AppResult<Found> {
    let id = parse_path(path)?;
    state.notebook.delete_note(id).await?;
    Ok(Found::to("/"))
}

/// `POST /note/{id}/addTag` — Attach the submitted tag.
///
/// # Errors
///
/// Returns 400 on a missing `tag_id`, 404 if either side does not exist.
pub async fn attach_tag(
    State(state): State<AppState>,
    path: Result<Path<NoteId>, PathRejection>,
    form: Result<Form<TagIdForm>, FormRejection>,
) -> AppResult<Found> {
    let id = parse_path(path)?;
    let form = parse_form(form)?;
    state.notebook.attach_tag(id, form.tag_id).await?;
    Ok(Found::to(format!("/note/{id}/")))
}

/// `GET|POST /note/{id}/deleteTag/{tag_id}/` — Detach a tag.
///
/// # Errors
///
/// Returns 404 if the note does not exist.
pub async fn detach_tag(
    State(state): State<AppState>,
    path: Result<Path<(NoteId, TagId)>, PathRejection>,
) -> AppResult<Found> {
    let (id, tag_id) = parse_path(path)?;
    state.notebook.detach_tag(id, tag_id).await?;
    Ok(Found::to(format!("/note/{id}/")))
}

/// Note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notes))
        .route("/note/{id}/", get(show_note).post(update_note))
        .route("/createNote/", get(create_note).post(create_note))
        .route("/deleteNote/{id}/", get(delete_note).post(delete_note))
        .route("/note/{id}/addTag", post(attach_tag))
        .route(
            "/note/{id}/deleteTag/{tag_id}/",
            get(detach_tag).post(detach_tag),
        )
}
