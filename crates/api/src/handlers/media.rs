//! Handlers for the `/media` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dronemap_core::error::CoreError;
use dronemap_core::geo::{nearby, NearbyStory};
use dronemap_core::map::MapView;
use dronemap_core::media::{filter_records, sort_newest_first, stats, MediaFilter, MediaRecord, MediaStats};
use dronemap_core::types::MediaId;

use crate::error::{AppError, AppResult};
use crate::flows::{self, UploadSubmission};
use crate::query::{FilterParams, LimitParams, MapParams};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_NEARBY: usize = 3;
const MAX_NEARBY: usize = 50;

/// GET /api/v1/media?type=&sort=newest
///
/// Filtering preserves stored order unless `sort=newest`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<DataResponse<Vec<MediaRecord>>>> {
    let filter = params
        .filter
        .as_deref()
        .map(MediaFilter::from_name)
        .transpose()?
        .unwrap_or_default();

    let mut records = filter_records(&state.session.read().await.records, filter);
    match params.sort.as_deref() {
        None | Some("") | Some("stored") => {}
        Some("newest") => sort_newest_first(&mut records),
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Unknown sort '{other}'. Must be one of: newest, stored"
            )))
        }
    }
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/media/stats
pub async fn get_stats(State(state): State<AppState>) -> Json<DataResponse<MediaStats>> {
    let data = stats(&state.session.read().await.records);
    Json(DataResponse { data })
}

/// GET /api/v1/media/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<MediaId>,
) -> AppResult<Json<DataResponse<MediaRecord>>> {
    let record = state
        .session
        .read()
        .await
        .find(id)
        .cloned()
        .ok_or(CoreError::NotFound { entity: "Story", id })?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/media
///
/// Multipart upload: `file` plus `title`, `description`, `lat`, `lon`,
/// `altitude`, optional `timestamp`.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MediaRecord>>)> {
    let submission = UploadSubmission::read(multipart).await?;
    let record = flows::upload(&state, &submission).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// DELETE /api/v1/media/{id}
///
/// Deleting an unknown id is a no-op, not an error.
pub async fn delete(State(state): State<AppState>, Path(id): Path<MediaId>) -> StatusCode {
    flows::delete(&state, id).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/media/{id}/nearby?limit=
pub async fn get_nearby(
    State(state): State<AppState>,
    Path(id): Path<MediaId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<NearbyStory>>>> {
    let session = state.session.read().await;
    if session.find(id).is_none() {
        return Err(CoreError::NotFound { entity: "Story", id }.into());
    }
    let limit = params.limit.unwrap_or(DEFAULT_NEARBY).min(MAX_NEARBY);
    Ok(Json(DataResponse {
        data: nearby(&session.records, id, limit),
    }))
}

/// GET /api/v1/map?mode=stories|pick
pub async fn get_map(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> Json<DataResponse<MapView>> {
    let records = state.session.read().await.records.clone();
    let view = flows::build_map(records, params.mode.unwrap_or_default()).await;
    Json(DataResponse { data: view })
}
