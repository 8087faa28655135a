//! Session accessors: auth token and last known position.
//!
//! The token is written by the login flow, the position by whatever watches
//! the device location; the post-creation and nearby flows only read them,
//! through the [`SessionProvider`] seam.

use wire::Location;

use crate::config::{POS_KEY, TOKEN_KEY};
use crate::storage::{Storage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no cached position; set a location first")]
    MissingPosition,
    #[error("not logged in")]
    MissingToken,
    #[error("cached position is not valid JSON: {0}")]
    CorruptPosition(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read access to the credentials a request needs.
pub trait SessionProvider {
    /// # Errors
    ///
    /// [`SessionError::MissingToken`] if nobody is logged in.
    fn token(&self) -> Result<String, SessionError>;

    /// # Errors
    ///
    /// [`SessionError::MissingPosition`] if no position was ever cached.
    fn position(&self) -> Result<Location, SessionError>;
}

/// Session data kept in a [`Storage`] under [`TOKEN_KEY`] and [`POS_KEY`].
#[derive(Debug, Default)]
pub struct Session<S> {
    storage: S,
}

impl<S: Storage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// # Errors
    ///
    /// Storage write failures.
    pub fn set_token(&mut self, token: &str) -> Result<(), SessionError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Storage write failures.
    pub fn clear_token(&mut self) -> Result<(), SessionError> {
        self.storage.remove_item(TOKEN_KEY)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Storage write failures.
    pub fn set_position(&mut self, position: Location) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&position)?;
        self.storage.set_item(POS_KEY, &raw)?;
        Ok(())
    }

    /// Whether a non-empty token is stored.
    ///
    /// # Errors
    ///
    /// Storage read failures.
    pub fn is_logged_in(&self) -> Result<bool, SessionError> {
        Ok(self.storage.get_item(TOKEN_KEY)?.is_some_and(|t| !t.is_empty()))
    }
}

impl<S: Storage> SessionProvider for Session<S> {
    fn token(&self) -> Result<String, SessionError> {
        self.storage
            .get_item(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)
    }

    fn position(&self) -> Result<Location, SessionError> {
        let raw = self.storage.get_item(POS_KEY)?.ok_or(SessionError::MissingPosition)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
