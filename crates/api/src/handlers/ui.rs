//! Handlers for the transient UI flags (`/ui`).

use axum::extract::State;
use axum::Json;
use dronemap_core::error::CoreError;
use dronemap_core::media::MediaFilter;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::session::UiFlags;
use crate::state::AppState;

/// GET /api/v1/ui
pub async fn get_flags(State(state): State<AppState>) -> Json<DataResponse<UiFlags>> {
    let data = state.session.read().await.ui.clone();
    Json(DataResponse { data })
}

/// Partial update; absent fields are left alone. `clear_location` drops
/// the picked pin.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUiFlags {
    pub upload_form_open: Option<bool>,
    pub selected_location: Option<(f64, f64)>,
    #[serde(default)]
    pub clear_location: bool,
    pub filter: Option<MediaFilter>,
}

/// PUT /api/v1/ui
pub async fn update_flags(
    State(state): State<AppState>,
    Json(input): Json<UpdateUiFlags>,
) -> AppResult<Json<DataResponse<UiFlags>>> {
    if let Some((lat, lon)) = input.selected_location {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::Validation(format!(
                "Location ({lat}, {lon}) is out of range"
            ))
            .into());
        }
    }

    let mut session = state.session.write().await;
    if let Some(open) = input.upload_form_open {
        session.ui.upload_form_open = open;
    }
    if input.clear_location {
        session.ui.selected_location = None;
    }
    if let Some(location) = input.selected_location {
        session.ui.selected_location = Some(location);
    }
    if let Some(filter) = input.filter {
        session.ui.filter = filter;
    }
    Ok(Json(DataResponse {
        data: session.ui.clone(),
    }))
}
