//! Handlers for the story viewer (`/story`).

use axum::extract::{Path, State};
use axum::Json;
use dronemap_core::media::MediaRecord;
use dronemap_core::navigator::ViewerState;
use dronemap_core::types::MediaId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::session::Session;
use crate::state::AppState;

/// Viewer state plus the record being shown.
#[derive(Debug, Serialize)]
pub struct StoryView {
    pub viewer: ViewerState,
    pub autoplay: bool,
    pub total: usize,
    pub current: Option<MediaRecord>,
}

impl StoryView {
    fn of(session: &Session) -> Self {
        Self {
            viewer: session.navigator.state(),
            autoplay: session.navigator.autoplay(),
            total: session.records.len(),
            current: session.current_story().cloned(),
        }
    }
}

type StoryResponse = Json<DataResponse<StoryView>>;

fn respond(session: &Session) -> StoryResponse {
    Json(DataResponse {
        data: StoryView::of(session),
    })
}

/// GET /api/v1/story
pub async fn get_state(State(state): State<AppState>) -> StoryResponse {
    respond(&*state.session.read().await)
}

/// POST /api/v1/story/open/{id}
pub async fn open(State(state): State<AppState>, Path(id): Path<MediaId>) -> AppResult<StoryResponse> {
    let mut session = state.session.write().await;
    session.open_story(id)?;
    Ok(respond(&session))
}

/// POST /api/v1/story/next
pub async fn next(State(state): State<AppState>) -> StoryResponse {
    let mut session = state.session.write().await;
    session.next_story();
    respond(&session)
}

/// POST /api/v1/story/previous
pub async fn previous(State(state): State<AppState>) -> StoryResponse {
    let mut session = state.session.write().await;
    session.previous_story();
    respond(&session)
}

/// POST /api/v1/story/close
pub async fn close(State(state): State<AppState>) -> StoryResponse {
    let mut session = state.session.write().await;
    session.close_story();
    respond(&session)
}

/// Body of `PUT /story/autoplay`.
#[derive(Debug, Deserialize)]
pub struct AutoplayInput {
    pub enabled: bool,
}

/// PUT /api/v1/story/autoplay
pub async fn set_autoplay(
    State(state): State<AppState>,
    Json(input): Json<AutoplayInput>,
) -> StoryResponse {
    let mut session = state.session.write().await;
    session.navigator.set_autoplay(input.enabled);
    respond(&session)
}
