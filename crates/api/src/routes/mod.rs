pub mod health;
pub mod pages;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{media, story, ui};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /media                             list ?type=&sort= (GET), upload (POST)
/// /media/stats                       totals by type (GET)
/// /media/{id}                        get, delete
/// /media/{id}/nearby                 closest stories ?limit= (GET)
///
/// /map                               markers and center ?mode= (GET)
///
/// /story                             viewer state (GET)
/// /story/open/{id}                   open viewer (POST)
/// /story/next                        advance (POST)
/// /story/previous                    step back (POST)
/// /story/close                       close (POST)
/// /story/autoplay                    toggle autoplay (PUT)
///
/// /ui                                get, update transient flags
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Media collection.
        .route("/media", get(media::list).post(media::create))
        .route("/media/stats", get(media::get_stats))
        .route("/media/{id}", get(media::get_by_id).delete(media::delete))
        .route("/media/{id}/nearby", get(media::get_nearby))
        // Map.
        .route("/map", get(media::get_map))
        // Story viewer.
        .route("/story", get(story::get_state))
        .route("/story/open/{id}", post(story::open))
        .route("/story/next", post(story::next))
        .route("/story/previous", post(story::previous))
        .route("/story/close", post(story::close))
        .route("/story/autoplay", put(story::set_autoplay))
        // UI flags.
        .route("/ui", get(ui::get_flags).put(ui::update_flags))
}
