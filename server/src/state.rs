//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Users, sessions, and posts live in `RwLock`-guarded in-memory maps;
//! uploaded images are the only thing written to disk (under
//! `config.media_dir`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use wire::Post;

use crate::config::ServerConfig;

// =============================================================================
// RECORDS
// =============================================================================

/// A registered account. The password is kept as a salted SHA-256 digest.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub salt: String,
    pub password_hash: String,
}

/// A live login session, keyed by its token in [`AppState::sessions`].
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub username: String,
    pub expires_at: Instant,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Accounts keyed by username.
    pub users: Arc<RwLock<HashMap<String, UserRecord>>>,
    /// Sessions keyed by token.
    pub sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    /// Posts in creation order.
    pub posts: Arc<RwLock<Vec<Post>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            posts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::path::Path;
    use std::time::Duration;

    use wire::{Credentials, Location};

    use super::*;
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

    /// Create a test `AppState` writing images under `media_dir`.
    #[must_use]
    pub fn test_app_state(media_dir: &Path) -> AppState {
        AppState::new(ServerConfig {
            port: 0,
            media_dir: media_dir.to_path_buf(),
            public_base_url: "http://test.local".into(),
            session_ttl: Duration::from_secs(3600),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        })
    }

    #[must_use]
    pub fn creds(username: &str, password: &str) -> Credentials {
        Credentials { username: username.into(), password: password.into() }
    }

    /// Register `username` and return a valid session token for it.
    pub async fn seed_user_session(state: &AppState, username: &str) -> String {
        crate::services::users::add_user(state, &creds(username, "pw")).await.unwrap();
        crate::services::session::create_session(state, username).await
    }

    #[must_use]
    pub fn dummy_post(user: &str, lat: f64, lon: f64) -> Post {
        Post {
            user: user.into(),
            message: format!("{user} was here"),
            url: format!("http://test.local/images/{user}.jpg"),
            location: Location { lat, lon },
        }
    }
}
