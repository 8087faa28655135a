use axum::body::{Body, to_bytes};
use axum::http::{Request, header};
use tower::ServiceExt;
use wire::Post;

use super::*;
use crate::routes::auth::{bearer_token, user_error_to_response};
use crate::routes::posts::media_error_to_status;
use crate::services::media::MediaError;
use crate::services::users::UserError;
use crate::state::test_helpers::{dummy_post, seed_user_session, test_app_state};

const BOUNDARY: &str = "XAROUNDBOUNDARY";

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn multipart_body(text_fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"pic\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn post_request(token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/post")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

fn search_request(token: &str, query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/search?{query}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn bearer_token_parsing() {
    assert_eq!(bearer_token("Bearer abc"), Some("abc"));
    assert_eq!(bearer_token("bearer   abc "), Some("abc"));
    assert_eq!(bearer_token("Basic abc"), None);
    assert_eq!(bearer_token("Bearer "), None);
    assert_eq!(bearer_token("abc"), None);
}

#[test]
fn user_errors_map_to_500() {
    assert_eq!(user_error_to_response(&UserError::Empty).status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        user_error_to_response(&UserError::Exists("a".into())).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn media_errors_map_to_status() {
    assert_eq!(media_error_to_status(&MediaError::Empty), StatusCode::BAD_REQUEST);
    assert_eq!(media_error_to_status(&MediaError::UnsupportedType("x".into())), StatusCode::BAD_REQUEST);
    let io = MediaError::Io(std::io::Error::other("disk full"));
    assert_eq!(media_error_to_status(&io), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// health
// =============================================================================

#[tokio::test]
async fn healthz_ok() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let (status, _) = send(&state, Request::builder().uri("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// signup / login
// =============================================================================

#[tokio::test]
async fn signup_then_login_returns_token() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());

    let (status, body) = send(&state, json_post("/signup", r#"{"username":"alice","password":"pw"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"User added successfully.");

    let (status, body) = send(&state, json_post("/login", r#"{"username":"alice","password":"pw"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let token = String::from_utf8(body).unwrap();
    assert_eq!(token.len(), 64);
    assert_eq!(crate::services::session::validate_session(&state, &token).await.as_deref(), Some("alice"));
}

#[tokio::test]
async fn signup_accepts_body_without_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .body(Body::from(r#"{"username":"bob","password":"pw"}"#))
        .unwrap();

    let (status, _) = send(&state, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn duplicate_signup_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    send(&state, json_post("/signup", r#"{"username":"alice","password":"pw"}"#)).await;

    let (status, body) = send(&state, json_post("/signup", r#"{"username":"alice","password":"other"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Failed to add a new user");
}

#[tokio::test]
async fn signup_with_empty_field_fails() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let (status, body) = send(&state, json_post("/signup", r#"{"username":"alice"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Empty password or username");
}

#[tokio::test]
async fn signup_with_garbage_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let (status, _) = send(&state, json_post("/signup", "not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_forbidden() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    send(&state, json_post("/signup", r#"{"username":"alice","password":"pw"}"#)).await;

    let (status, body) = send(&state, json_post("/login", r#"{"username":"alice","password":"nope"}"#)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, b"Invalid password or username");
}

// =============================================================================
// post
// =============================================================================

#[tokio::test]
async fn post_without_token_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let body = multipart_body(&[("lat", "1"), ("lon", "2"), ("message", "m")], Some(("image/png", b"png")));

    let (status, _) = send(&state, post_request(None, body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(state.posts.read().await.is_empty());
}

#[tokio::test]
async fn post_with_unknown_token_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let body = multipart_body(&[("lat", "1"), ("lon", "2"), ("message", "m")], Some(("image/png", b"png")));

    let (status, _) = send(&state, post_request(Some("forged"), body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn post_stores_post_and_serves_image() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;
    let body = multipart_body(
        &[("lat", "47.61"), ("lon", "-122.33"), ("message", "ferry")],
        Some(("image/png", b"\x89PNG-bytes")),
    );

    let (status, reply) = send(&state, post_request(Some(&token), body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, b"Post received: ferry");

    let stored: Post = state.posts.read().await[0].clone();
    assert_eq!(stored.user, "alice");
    assert_eq!(stored.message, "ferry");
    assert!((stored.location.lat - 47.61).abs() < 1e-9);
    assert!((stored.location.lon + 122.33).abs() < 1e-9);

    let path = stored.url.strip_prefix("http://test.local").unwrap().to_owned();
    assert!(path.starts_with("/images/") && path.ends_with(".png"));
    let (status, image) = send(&state, Request::builder().uri(path).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(image, b"\x89PNG-bytes");
}

#[tokio::test]
async fn post_missing_image_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;
    let body = multipart_body(&[("lat", "1"), ("lon", "2"), ("message", "m")], None);

    let (status, reply) = send(&state, post_request(Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply, b"missing field `image`");
}

#[tokio::test]
async fn post_with_bad_coordinates_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;

    let body = multipart_body(&[("lat", "north"), ("lon", "2"), ("message", "m")], Some(("image/png", b"p")));
    let (status, _) = send(&state, post_request(Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = multipart_body(&[("lat", "95"), ("lon", "2"), ("message", "m")], Some(("image/png", b"p")));
    let (status, _) = send(&state, post_request(Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.posts.read().await.is_empty());
}

#[tokio::test]
async fn post_with_non_image_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;
    let body = multipart_body(&[("lat", "1"), ("lon", "2"), ("message", "m")], Some(("text/plain", b"hello")));

    let (status, _) = send(&state, post_request(Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// search
// =============================================================================

#[tokio::test]
async fn search_returns_posts_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;
    crate::services::posts::create_post(&state, dummy_post("near", 10.0, 10.0)).await;
    crate::services::posts::create_post(&state, dummy_post("far", 30.0, 30.0)).await;

    let (status, body) = send(&state, search_request(&token, "lat=10.01&lon=10.0&range=50")).await;
    assert_eq!(status, StatusCode::OK);
    let posts: Vec<Post> = serde_json::from_slice(&body).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user, "near");
}

#[tokio::test]
async fn search_requires_token() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let request = Request::builder().uri("/search?lat=0&lon=0").body(Body::empty()).unwrap();

    let (status, _) = send(&state, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_without_coordinates_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_app_state(dir.path());
    let token = seed_user_session(&state, "alice").await;

    let (status, _) = send(&state, search_request(&token, "range=5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
