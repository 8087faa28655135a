//! Auth routes: signup, login, and the bearer-token extractor.
//!
//! Bodies are decoded from raw bytes rather than through `Json`, so requests
//! that omit `Content-Type: application/json` are still accepted.

use axum::body::Bytes;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};
use wire::Credentials;

use crate::services::session;
use crate::services::users::{self, UserError};
use crate::state::AppState;

const AUTH_SCHEME: &str = "Bearer";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from `Authorization: Bearer <token>`.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub username: String,
}

/// Token from an `Authorization` header value; the scheme is case-insensitive.
pub(crate) fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(AUTH_SCHEME) && !token.is_empty()).then_some(token)
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = AppState::from_ref(state);
        let username = session::validate_session(&app_state, token)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { username })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

fn parse_credentials(body: &[u8]) -> Result<Credentials, Response> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "failed to parse credentials body");
        (StatusCode::BAD_REQUEST, format!("Failed to parse body: {e}")).into_response()
    })
}

pub(crate) fn user_error_to_response(err: &UserError) -> Response {
    match err {
        UserError::Empty => (StatusCode::INTERNAL_SERVER_ERROR, "Empty password or username").into_response(),
        UserError::Exists(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to add a new user").into_response(),
    }
}

/// `POST /signup`: register `{username, password}`.
pub async fn signup(State(state): State<AppState>, body: Bytes) -> Response {
    let credentials = match parse_credentials(&body) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match users::add_user(&state, &credentials).await {
        Ok(()) => {
            info!(username = %credentials.username, "user added");
            (StatusCode::OK, "User added successfully.").into_response()
        }
        Err(e) => {
            warn!(username = %credentials.username, error = %e, "signup rejected");
            user_error_to_response(&e)
        }
    }
}

/// `POST /login`: exchange credentials for a session token (plain-text body).
pub async fn login(State(state): State<AppState>, body: Bytes) -> Response {
    let credentials = match parse_credentials(&body) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    if !users::check_user(&state, &credentials).await {
        warn!(username = %credentials.username, "invalid login");
        return (StatusCode::FORBIDDEN, "Invalid password or username").into_response();
    }

    let token = session::create_session(&state, &credentials.username).await;
    info!(username = %credentials.username, "login succeeded");
    (StatusCode::OK, token).into_response()
}
