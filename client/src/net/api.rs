//! REST API client.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result`. Any non-2xx status becomes
//! [`ApiError::Status`] carrying the response body so callers can log the
//! detail while showing the user a generic message.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use wire::{Credentials, Location, Post, SearchQuery, fields};

use crate::config::ClientConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Image attached to a new post.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Payload of `POST /post`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub location: Location,
    pub message: String,
    pub image: ImageFile,
}

/// Operations the front end performs against the service. Enables mocking
/// in tests.
#[async_trait::async_trait]
pub trait Api: Send + Sync {
    /// `POST /signup`; returns the response text.
    async fn signup(&self, credentials: &Credentials) -> Result<String, ApiError>;

    /// `POST /login`; returns the issued token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    /// `POST /post` as multipart form data.
    async fn create_post(&self, token: &str, post: NewPost) -> Result<(), ApiError>;

    /// `GET /search`.
    async fn search(&self, token: &str, query: SearchQuery) -> Result<Vec<Post>, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    api_root: String,
    auth_scheme: String,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_root: config.api_root.trim_end_matches('/').to_owned(),
            auth_scheme: config.auth_scheme.clone(),
        })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_root)
    }

    /// `Authorization` header value for `token`.
    #[must_use]
    pub fn authorization(&self, token: &str) -> String {
        format!("{} {token}", self.auth_scheme)
    }
}

/// Multipart body of a post-creation request.
///
/// # Errors
///
/// Returns an error if the image content type is not a valid MIME string.
pub fn post_form(post: NewPost) -> Result<Form, ApiError> {
    let NewPost { location, message, image } = post;
    let image = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;

    Ok(Form::new()
        .text(fields::LAT, location.lat.to_string())
        .text(fields::LON, location.lon.to_string())
        .text(fields::MESSAGE, message)
        .part(fields::IMAGE, image))
}

async fn success_text(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    Ok(body)
}

#[async_trait::async_trait]
impl Api for HttpApi {
    async fn signup(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url(wire::SIGNUP_PATH))
            .json(credentials)
            .send()
            .await?;
        success_text(response).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url(wire::LOGIN_PATH))
            .json(credentials)
            .send()
            .await?;
        let token = success_text(response).await?;
        Ok(token.trim().to_owned())
    }

    async fn create_post(&self, token: &str, post: NewPost) -> Result<(), ApiError> {
        let form = post_form(post)?;
        let response = self
            .http
            .post(self.url(wire::POST_PATH))
            .header(reqwest::header::AUTHORIZATION, self.authorization(token))
            .multipart(form)
            .send()
            .await?;
        success_text(response).await.map(|_| ())
    }

    async fn search(&self, token: &str, query: SearchQuery) -> Result<Vec<Post>, ApiError> {
        let response = self
            .http
            .get(self.url(wire::SEARCH_PATH))
            .header(reqwest::header::AUTHORIZATION, self.authorization(token))
            .query(&query)
            .send()
            .await?;
        let body = success_text(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
