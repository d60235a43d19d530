//! Integration tests for the story viewer and UI flag endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, put_json};
use serde_json::json;

#[tokio::test]
async fn viewer_starts_closed_with_autoplay_on() {
    let app = common::build_test_app().await;
    let json = body_json(get(&app, "/api/v1/story").await).await;

    assert_eq!(json["data"]["viewer"]["state"], "closed");
    assert_eq!(json["data"]["autoplay"], true);
    assert_eq!(json["data"]["total"], 2);
    assert!(json["data"]["current"].is_null());
}

#[tokio::test]
async fn open_then_step_wraps_around() {
    let app = common::build_test_app().await;

    let json = body_json(post_empty(&app, "/api/v1/story/open/2").await).await;
    assert_eq!(json["data"]["viewer"]["state"], "viewing");
    assert_eq!(json["data"]["viewer"]["index"], 1);
    assert_eq!(json["data"]["current"]["id"], 2);

    // Last story wraps to the first.
    let json = body_json(post_empty(&app, "/api/v1/story/next").await).await;
    assert_eq!(json["data"]["current"]["id"], 1);

    // And back again.
    let json = body_json(post_empty(&app, "/api/v1/story/previous").await).await;
    assert_eq!(json["data"]["current"]["id"], 2);
    let json = body_json(post_empty(&app, "/api/v1/story/previous").await).await;
    assert_eq!(json["data"]["current"]["id"], 1);
}

#[tokio::test]
async fn open_unknown_story_returns_404_and_keeps_state() {
    let app = common::build_test_app().await;
    post_empty(&app, "/api/v1/story/open/1").await;

    let response = post_empty(&app, "/api/v1/story/open/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(&app, "/api/v1/story").await).await;
    assert_eq!(json["data"]["current"]["id"], 1);
}

#[tokio::test]
async fn close_clears_current_story() {
    let app = common::build_test_app().await;
    post_empty(&app, "/api/v1/story/open/1").await;

    let json = body_json(post_empty(&app, "/api/v1/story/close").await).await;
    assert_eq!(json["data"]["viewer"]["state"], "closed");
    assert!(json["data"]["current"].is_null());
}

#[tokio::test]
async fn stepping_while_closed_does_nothing() {
    let app = common::build_test_app().await;

    let json = body_json(post_empty(&app, "/api/v1/story/next").await).await;
    assert_eq!(json["data"]["viewer"]["state"], "closed");
    assert!(json["data"]["current"].is_null());
}

#[tokio::test]
async fn autoplay_can_be_toggled() {
    let app = common::build_test_app().await;

    let response = put_json(&app, "/api/v1/story/autoplay", json!({ "enabled": false })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["autoplay"], false);

    let json = body_json(get(&app, "/api/v1/story").await).await;
    assert_eq!(json["data"]["autoplay"], false);
}

// ---------------------------------------------------------------------------
// UI flags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ui_flags_default_and_partial_update() {
    let app = common::build_test_app().await;

    let json = body_json(get(&app, "/api/v1/ui").await).await;
    assert_eq!(json["data"]["upload_form_open"], false);
    assert!(json["data"]["selected_location"].is_null());
    assert_eq!(json["data"]["filter"], "all");

    let response = put_json(
        &app,
        "/api/v1/ui",
        json!({ "selected_location": [34.1, -118.3], "filter": "video" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["selected_location"], json!([34.1, -118.3]));
    assert_eq!(json["data"]["filter"], "video");
    assert_eq!(json["data"]["upload_form_open"], false);

    let json = body_json(put_json(&app, "/api/v1/ui", json!({ "clear_location": true })).await).await;
    assert!(json["data"]["selected_location"].is_null());
    assert_eq!(json["data"]["filter"], "video");
}

#[tokio::test]
async fn ui_rejects_out_of_range_location() {
    let app = common::build_test_app().await;

    let response = put_json(&app, "/api/v1/ui", json!({ "selected_location": [95.0, 0.0] })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
