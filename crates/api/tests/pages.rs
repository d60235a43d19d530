//! Integration tests for the server-rendered HTML pages.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, get, png_bytes, post_empty, post_multipart, story_form, MultipartBody};

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn index_renders_map_and_cards() {
    let app = common::build_test_app().await;
    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("Media Locations"));
    assert!(html.contains("id=\"story-map\""));
    assert!(html.contains("href=\"/stories/1\""));
    assert!(html.contains("Downtown skyline orbit"));
}

#[tokio::test]
async fn opening_a_story_shows_the_viewer() {
    let app = common::build_test_app().await;
    let response = get(&app, "/stories/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/stories/next\""));
    assert!(html.contains("Downtown skyline orbit"));
}

#[tokio::test]
async fn opening_unknown_story_redirects_to_map() {
    let app = common::build_test_app().await;
    let response = get(&app, "/stories/77").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let story = body_json(get(&app, "/api/v1/story").await).await;
    assert_eq!(story["data"]["viewer"]["state"], "closed");
}

#[tokio::test]
async fn unknown_filter_redirects_to_story_list() {
    let app = common::build_test_app().await;
    get(&app, "/stories?filter=video").await;

    let response = get(&app, "/stories?filter=panoramas").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/stories");

    // The previous choice is kept.
    let flags = body_json(get(&app, "/api/v1/ui").await).await;
    assert_eq!(flags["data"]["filter"], "video");
}

#[tokio::test]
async fn next_previous_and_close_redirect() {
    let app = common::build_test_app().await;
    get(&app, "/stories/2").await;

    let response = post_empty(&app, "/stories/next").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/stories/1");

    let response = post_empty(&app, "/stories/previous").await;
    assert_eq!(location(&response), "/stories/2");

    let response = post_empty(&app, "/stories/close").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // Closed viewer: stepping lands back on the map.
    let response = post_empty(&app, "/stories/next").await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn stories_tab_filters_and_remembers_choice() {
    let app = common::build_test_app().await;

    let html = body_text(get(&app, "/stories?filter=photo").await).await;
    assert!(html.contains("Sunset over Santa Monica"));
    assert!(!html.contains("Downtown skyline orbit"));
    assert!(html.contains("<option value=\"photo\" selected>"));

    // No filter given: the last one sticks.
    let html = body_text(get(&app, "/stories").await).await;
    assert!(!html.contains("Downtown skyline orbit"));

    let flags = body_json(get(&app, "/api/v1/ui").await).await;
    assert_eq!(flags["data"]["filter"], "photo");
}

#[tokio::test]
async fn delete_form_removes_story_and_redirects() {
    let app = common::build_test_app().await;

    let response = post_empty(&app, "/stories/1/delete").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/stories");

    let json = body_json(get(&app, "/api/v1/media").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // The data file no longer holds it either.
    let common::TestApp { dir, .. } = app;
    let restarted = common::build_test_app_in(dir).await;
    let json = body_json(get(&restarted, "/api/v1/media").await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn upload_page_renders_form_and_picker() {
    let app = common::build_test_app().await;
    let html = body_text(get(&app, "/upload").await).await;

    assert!(html.contains("enctype=\"multipart/form-data\""));
    assert!(html.contains("id=\"pick-map\""));

    let flags = body_json(get(&app, "/api/v1/ui").await).await;
    assert_eq!(flags["data"]["upload_form_open"], true);
}

#[tokio::test]
async fn upload_page_prefills_picked_location() {
    let app = common::build_test_app().await;
    common::put_json(
        &app,
        "/api/v1/ui",
        serde_json::json!({ "selected_location": [34.1, -118.3] }),
    )
    .await;

    let html = body_text(get(&app, "/upload").await).await;
    assert!(html.contains("name=\"lat\" step=\"0.000001\" min=\"-90\" max=\"90\" value=\"34.100000\""));
    assert!(html.contains("value=\"-118.300000\""));
}

#[tokio::test]
async fn upload_form_success_redirects_to_new_story() {
    let app = common::build_test_app().await;
    get(&app, "/upload").await;

    let body = story_form("Marina", "marina.jpg", &png_bytes(8, 8));
    let response = post_multipart(&app, "/upload", body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/stories/3");

    let flags = body_json(get(&app, "/api/v1/ui").await).await;
    assert_eq!(flags["data"]["upload_form_open"], false);
}

#[tokio::test]
async fn upload_form_failure_rerenders_with_warning() {
    let app = common::build_test_app().await;
    let body = MultipartBody::new()
        .text("title", "Kept title")
        .text("description", "")
        .file("file", "clip.mp4", "video/mp4", b"data")
        .finish();

    let response = post_multipart(&app, "/upload", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("Please add a description"));
    assert!(html.contains("Kept title"));
}

#[tokio::test]
async fn oversized_upload_body_rerenders_form_with_warning() {
    let app = common::build_test_app().await;
    // Past the 1 MB file cap plus the 1 MiB allowance for form fields.
    let big = vec![0u8; 3 * 1024 * 1024];
    let body = story_form("Huge", "huge.mp4", &big);

    let response = post_multipart(&app, "/upload", body).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("class=\"warning\""));
    assert!(html.contains("File is too large. Maximum is 1 MB"));
    assert!(html.contains("enctype=\"multipart/form-data\""));

    let json = body_json(get(&app, "/api/v1/media").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn thumbnail_serves_jpeg_for_photos_only() {
    let app = common::build_test_app().await;
    post_multipart(
        &app,
        "/api/v1/media",
        story_form("Wide shot", "wide.png", &png_bytes(600, 300)),
    )
    .await;

    let response = get(&app, "/media/3/thumbnail?w=300&h=200").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let bytes = common::body_bytes(response).await;
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    // Seed video has no file and is not a photo.
    assert_eq!(
        get(&app, "/media/2/thumbnail").await.status(),
        StatusCode::NOT_FOUND
    );
}
