//! Account registration and credential checks.

use rand::Rng;
use sha2::{Digest, Sha256};
use wire::Credentials;

use super::session::bytes_to_hex;
use crate::state::{AppState, UserRecord};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Empty password or username")]
    Empty,
    #[error("user {0} already exists")]
    Exists(String),
}

#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Register a new account.
///
/// # Errors
///
/// [`UserError::Empty`] for a blank username or password,
/// [`UserError::Exists`] if the username is taken.
pub async fn add_user(state: &AppState, credentials: &Credentials) -> Result<(), UserError> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(UserError::Empty);
    }

    let mut users = state.users.write().await;
    if users.contains_key(&credentials.username) {
        return Err(UserError::Exists(credentials.username.clone()));
    }

    let salt = generate_salt();
    let password_hash = hash_password(&salt, &credentials.password);
    users.insert(
        credentials.username.clone(),
        UserRecord { username: credentials.username.clone(), salt, password_hash },
    );
    Ok(())
}

/// Whether `credentials` match a registered account.
pub async fn check_user(state: &AppState, credentials: &Credentials) -> bool {
    let users = state.users.read().await;
    users
        .get(&credentials.username)
        .is_some_and(|u| u.password_hash == hash_password(&u.salt, &credentials.password))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
