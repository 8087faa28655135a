//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! REST endpoints the front end calls (`/signup`, `/login`, `/post`,
//! `/search`), uploaded images served from the media directory under
//! `/images`, and a health check. CORS is open to any origin.

pub mod auth;
pub mod posts;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Headroom above the image size for the text fields and multipart framing.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let images = ServeDir::new(&state.config.media_dir);
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(wire::SIGNUP_PATH, post(auth::signup))
        .route(wire::LOGIN_PATH, post(auth::login))
        .route(wire::POST_PATH, post(posts::create_post))
        .route(wire::SEARCH_PATH, get(posts::search))
        .route("/healthz", get(healthz))
        .nest_service(wire::IMAGES_PATH, images)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
