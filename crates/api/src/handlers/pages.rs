//! Handlers for the HTML pages.
//!
//! Mutations answer with a `303 See Other` back to a page, so a reload
//! never repeats them.

use std::path::PathBuf;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use dronemap_core::error::CoreError;
use dronemap_core::geo::nearby;
use dronemap_core::map::{story_url, MapMode};
use dronemap_core::media::{filter_records, sort_newest_first, stats, MediaFilter};
use dronemap_core::thumbnail::{thumbnail_jpeg, CARD_THUMB};
use dronemap_core::types::MediaId;

use crate::error::{AppError, AppResult};
use crate::flows::{self, existing_file, has_photo_preview, UploadSubmission};
use crate::query::{FilterParams, ThumbnailParams};
use crate::session::Session;
use crate::state::AppState;
use crate::views::layout::{page, stats_boxes, Tab};
use crate::views::stories::{card_grid, filter_form, story_list};
use crate::views::upload_form::{upload_form, FormValues};
use crate::views::viewer::story_viewer;

/// Stories listed under the viewer.
const NEARBY_LIMIT: usize = 3;

/// Largest thumbnail edge a client may request.
const MAX_THUMB_EDGE: u32 = 1024;

/// The viewer panel when a story is open, else nothing.
fn viewer_section(session: &Session) -> String {
    let (Some(index), Some(record)) = (
        session.navigator.current_index(),
        session.current_story(),
    ) else {
        return String::new();
    };
    let near = nearby(&session.records, record.id, NEARBY_LIMIT);
    story_viewer(
        record,
        index,
        session.records.len(),
        session.navigator.autoplay(),
        &near,
    )
}

/// GET /
///
/// Map of all stories above a card grid, with the viewer on top when open.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (viewer, records) = {
        let session = state.session.read().await;
        (viewer_section(&session), session.records.clone())
    };
    let grid = card_grid(&records);
    let map = flows::build_map(records, MapMode::Stories).await;

    let body = format!(
        "{viewer}<h3>&#x1F4CD; Media Locations</h3>{}{grid}",
        map.to_html("story-map")
    );
    Html(page("Map View", Tab::Map, &body))
}

/// GET /stories/{id}
///
/// Open the viewer on `id` and show the map page. An unknown id lands on
/// the plain map.
pub async fn open_story(State(state): State<AppState>, Path(id): Path<MediaId>) -> Response {
    if let Err(e) = state.session.write().await.open_story(id) {
        tracing::debug!(media_id = id, error = %e, "Story link to unknown id");
        return Redirect::to("/").into_response();
    }
    index(State(state)).await.into_response()
}

/// GET /stories
///
/// Filtered story list, newest first. The chosen filter sticks for the
/// rest of the session; an unknown filter redirects back to the list.
pub async fn stories(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Response {
    let mut session = state.session.write().await;
    if let Some(raw) = params.filter.as_deref() {
        match MediaFilter::from_name(raw) {
            Ok(filter) => session.ui.filter = filter,
            Err(e) => {
                tracing::debug!(filter = raw, error = %e, "Ignoring unknown story filter");
                return Redirect::to("/stories").into_response();
            }
        }
    }
    let filter = session.ui.filter;

    let mut listed = filter_records(&session.records, filter);
    sort_newest_first(&mut listed);

    let body = format!(
        "{}{}{}{}",
        viewer_section(&session),
        stats_boxes(&stats(&session.records)),
        filter_form(filter),
        story_list(&listed)
    );
    Html(page("Stories", Tab::Stories, &body)).into_response()
}

/// POST /stories/next
pub async fn next(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.write().await;
    redirect_to_current(session.next_story().map(|r| r.id))
}

/// POST /stories/previous
pub async fn previous(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.write().await;
    redirect_to_current(session.previous_story().map(|r| r.id))
}

/// POST /stories/close
pub async fn close(State(state): State<AppState>) -> Redirect {
    state.session.write().await.close_story();
    Redirect::to("/")
}

fn redirect_to_current(id: Option<MediaId>) -> Redirect {
    match id {
        Some(id) => Redirect::to(&story_url(id)),
        None => Redirect::to("/"),
    }
}

/// POST /stories/{id}/delete
pub async fn delete(State(state): State<AppState>, Path(id): Path<MediaId>) -> Redirect {
    flows::delete(&state, id).await;
    Redirect::to("/stories")
}

/// GET /upload
pub async fn upload_page(State(state): State<AppState>) -> Html<String> {
    let (selected, records) = {
        let mut session = state.session.write().await;
        session.ui.upload_form_open = true;
        (session.ui.selected_location, session.records.clone())
    };
    render_upload(&state, records, &FormValues::initial(selected), None).await
}

/// POST /upload
///
/// On a validation failure the form comes back (422) with the user's input
/// and an inline warning; a body over the size cap gets the same form
/// (413) with empty fields. On success the new story opens.
pub async fn upload_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let submission = match UploadSubmission::read(multipart).await {
        Ok(submission) => submission,
        Err(AppError::PayloadTooLarge(reason)) => {
            tracing::info!(reason = %reason, "Upload body over the size cap");
            let max_mb = state.config.max_upload_bytes / (1024 * 1024);
            let (selected, records) = {
                let session = state.session.read().await;
                (session.ui.selected_location, session.records.clone())
            };
            let warning = format!("File is too large. Maximum is {max_mb} MB");
            let html =
                render_upload(&state, records, &FormValues::initial(selected), Some(&warning)).await;
            return Ok((StatusCode::PAYLOAD_TOO_LARGE, html).into_response());
        }
        Err(other) => return Err(other),
    };
    match flows::upload(&state, &submission).await {
        Ok(record) => Ok(Redirect::to(&story_url(record.id)).into_response()),
        Err(AppError::Core(CoreError::Validation(msg))) => {
            tracing::info!(reason = %msg, "Upload rejected");
            let records = state.session.read().await.records.clone();
            let html =
                render_upload(&state, records, &FormValues::from(&submission), Some(&msg)).await;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
        }
        Err(other) => Err(other),
    }
}

async fn render_upload(
    state: &AppState,
    records: Vec<dronemap_core::media::MediaRecord>,
    values: &FormValues,
    warning: Option<&str>,
) -> Html<String> {
    let map = flows::build_map(records, MapMode::PickLocation).await;
    let max_mb = state.config.max_upload_bytes / (1024 * 1024);
    let body = upload_form(values, warning, &map.to_html("pick-map"), max_mb);
    Html(page("Add Media", Tab::Upload, &body))
}

/// GET /media/{id}/thumbnail?w=&h=
///
/// JPEG preview of a photo story. 404 for videos and missing files.
pub async fn thumbnail(
    State(state): State<AppState>,
    Path(id): Path<MediaId>,
    Query(params): Query<ThumbnailParams>,
) -> AppResult<Response> {
    let path = {
        let session = state.session.read().await;
        let record = session
            .find(id)
            .ok_or(CoreError::NotFound { entity: "Story", id })?;
        if !has_photo_preview(record) {
            return Err(CoreError::NotFound { entity: "Thumbnail", id }.into());
        }
        existing_file(record).map(PathBuf::from)
    };
    let path = path.ok_or(CoreError::NotFound { entity: "Thumbnail", id })?;

    let w = params.w.unwrap_or(CARD_THUMB.0).clamp(1, MAX_THUMB_EDGE);
    let h = params.h.unwrap_or(CARD_THUMB.1).clamp(1, MAX_THUMB_EDGE);
    let bytes = tokio::task::spawn_blocking(move || thumbnail_jpeg(&path, w, h))
        .await
        .map_err(|e| AppError::InternalError(format!("Thumbnail task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
