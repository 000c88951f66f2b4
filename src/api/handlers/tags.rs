//! Tag handlers: list, create, rename, delete.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::api::Found;
use crate::api::forms::{TagNameForm, parse_form, parse_path};
use crate::app_state::AppState;
use crate::domain::TagId;
use crate::error::AppResult;
use crate::views;

const TAGS_VIEW: &str = "/tags/";

/// `GET /tags/` — Every tag.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Html<String>> {
    let tags = state.notebook.list_tags().await?;
    Ok(Html(views::tags_page(&tags)))
}

/// `POST /createTag/` — Create a tag. Empty names redirect silently.
///
/// # Errors
///
/// Returns 400 on an overlong name.
pub async fn create_tag(
    State(state): State<AppState>,
    form: Result<Form<TagNameForm>, FormRejection>,
) -> AppResult<Found> {
    let form = parse_form(form)?;
    state.notebook.create_tag(&form.name).await?;
    Ok(Found::to(TAGS_VIEW))
}

/// `GET|POST /tag/{id}/` — Rename a tag. Empty names redirect silently.
///
/// # Errors
///
/// Returns 400 on an overlong name, 404 if the tag does not exist.
pub async fn rename_tag(
    State(state): State<AppState>,
    path: Result<Path<TagId>, PathRejection>,
    form: Result<Form<TagNameForm>, FormRejection>,
) -> AppResult<Found> {
    let id = parse_path(path)?;
    let form = parse_form(form)?;
    state.notebook.rename_tag(id, &form.name).await?;
    Ok(Found::to(TAGS_VIEW))
}

/// `GET|POST /deleteTag/{id}/` — Delete a tag; unknown ids are ignored.
///
/// # Errors
///
/// Returns [`crate::error::AppError`] on store failure.
pub async fn delete_tag(
    State(state): State<AppState>,
    path: Result<Path<TagId>, PathRejection>,
) -> AppResult<Found> {
    let id = parse_path(path)?;
    state.notebook.delete_tag(id).await?;
    Ok(Found::to(TAGS_VIEW))
}

/// Tag routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tags/", get(list_tags))
        .route("/createTag/", post(create_tag))
        .route("/tag/{id}/", get(rename_tag).post(rename_tag))
        .route("/deleteTag/{id}/", get(delete_tag).post(delete_tag))
}
