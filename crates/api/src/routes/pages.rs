use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Mount the HTML pages at the root.
///
/// ```text
/// /                                  map tab (GET)
/// /stories                           stories tab, ?filter= (GET)
/// /stories/{id}                      open viewer on a story (GET)
/// /stories/next                      advance viewer (POST)
/// /stories/previous                  step viewer back (POST)
/// /stories/close                     close viewer (POST)
/// /stories/{id}/delete               delete a story (POST)
/// /upload                            upload tab (GET), submit (POST)
/// /media/{id}/thumbnail              JPEG preview, ?w=&h= (GET)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/stories", get(pages::stories))
        .route("/stories/next", post(pages::next))
        .route("/stories/previous", post(pages::previous))
        .route("/stories/close", post(pages::close))
        .route("/stories/{id}", get(pages::open_story))
        .route("/stories/{id}/delete", post(pages::delete))
        .route("/upload", get(pages::upload_page).post(pages::upload_submit))
        .route("/media/{id}/thumbnail", get(pages::thumbnail))
}
