//! Login sessions.
//!
//! Tokens are random 32-byte hex strings held in memory with an expiry.
//! Expired sessions are dropped lazily, on lookup and on each new login.

use std::fmt::Write;
use std::time::Instant;

use rand::Rng;

use crate::state::{AppState, SessionRecord};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Create a session for `username`, returning the token.
pub async fn create_session(state: &AppState, username: &str) -> String {
    let token = generate_token();
    let now = Instant::now();
    let record = SessionRecord { username: username.to_owned(), expires_at: now + state.config.session_ttl };

    let mut sessions = state.sessions.write().await;
    sessions.retain(|_, s| s.expires_at > now);
    sessions.insert(token.clone(), record);
    token
}

/// Resolve a token to its username, if the session exists and is live.
pub async fn validate_session(state: &AppState, token: &str) -> Option<String> {
    validate_session_at(state, token, Instant::now()).await
}

pub(crate) async fn validate_session_at(state: &AppState, token: &str, now: Instant) -> Option<String> {
    {
        let sessions = state.sessions.read().await;
        match sessions.get(token) {
            None => return None,
            Some(s) if s.expires_at > now => return Some(s.username.clone()),
            Some(_) => {}
        }
    }
    state.sessions.write().await.remove(token);
    None
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
