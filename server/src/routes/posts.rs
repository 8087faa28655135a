//! Post routes: multipart creation and radius search.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};
use wire::{Location, LocationError, Post, SearchQuery, fields};

use super::auth::AuthUser;
use crate::services::media::{self, MediaError};
use crate::services::posts;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PostFormError {
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("field `{0}` is not a number")]
    NotANumber(&'static str),
    #[error(transparent)]
    Location(#[from] LocationError),
}

/// Uploaded image as received.
#[derive(Debug)]
pub struct UploadedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct PostForm {
    pub location: Location,
    pub message: String,
    pub image: UploadedImage,
}

fn parse_coordinate(field: &'static str, raw: Option<String>) -> Result<f64, PostFormError> {
    raw.ok_or(PostFormError::Missing(field))?
        .trim()
        .parse::<f64>()
        .map_err(|_| PostFormError::NotANumber(field))
}

/// Collect the post fields from a multipart stream. Unknown fields are
/// skipped; a repeated field keeps its last value.
pub async fn read_post_form(multipart: &mut Multipart) -> Result<PostForm, PostFormError> {
    let (mut lat, mut lon, mut message, mut image) = (None, None, None, None);

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(fields::LAT) => lat = Some(field.text().await?),
            Some(fields::LON) => lon = Some(field.text().await?),
            Some(fields::MESSAGE) => message = Some(field.text().await?),
            Some(fields::IMAGE) => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?.to_vec();
                image = Some(UploadedImage { content_type, bytes });
            }
            _ => {}
        }
    }

    let location = Location::new(parse_coordinate(fields::LAT, lat)?, parse_coordinate(fields::LON, lon)?)?;
    let message = message.ok_or(PostFormError::Missing(fields::MESSAGE))?;
    let image = image.ok_or(PostFormError::Missing(fields::IMAGE))?;
    Ok(PostForm { location, message, image })
}

pub(crate) fn media_error_to_status(err: &MediaError) -> StatusCode {
    match err {
        MediaError::UnsupportedType(_) | MediaError::Empty => StatusCode::BAD_REQUEST,
        MediaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /post`: create a post from multipart `lat`, `lon`, `message`, `image`.
pub async fn create_post(State(state): State<AppState>, auth: AuthUser, mut multipart: Multipart) -> Response {
    let form = match read_post_form(&mut multipart).await {
        Ok(f) => f,
        Err(e) => {
            warn!(user = %auth.username, error = %e, "rejected post form");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let name = match media::save_image(&state.config.media_dir, &form.image.content_type, &form.image.bytes).await {
        Ok(name) => name,
        Err(e) => {
            let status = media_error_to_status(&e);
            if status.is_server_error() {
                error!(user = %auth.username, error = %e, "image store failed");
            } else {
                warn!(user = %auth.username, error = %e, "rejected image");
            }
            return (status, e.to_string()).into_response();
        }
    };

    let post = Post {
        user: auth.username,
        message: form.message,
        url: format!("{}{}/{name}", state.config.public_base_url, wire::IMAGES_PATH),
        location: form.location,
    };
    info!(user = %post.user, lat = post.location.lat, lon = post.location.lon, "post received");

    let reply = format!("Post received: {}", post.message);
    posts::create_post(&state, post).await;
    (StatusCode::OK, reply).into_response()
}

/// `GET /search?lat=&lon=&range=`: posts within `range` km, newest first.
pub async fn search(State(state): State<AppState>, auth: AuthUser, Query(query): Query<SearchQuery>) -> Json<Vec<Post>> {
    let found = posts::search(&state, &query).await;
    info!(user = %auth.username, lat = query.lat, lon = query.lon, range_km = query.range_km(), count = found.len(), "search");
    Json(found)
}
