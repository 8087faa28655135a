//! Nearby post list and the markers rendered for it.

#[cfg(test)]
#[path = "nearby_test.rs"]
mod nearby_test;

use tracing::{debug, warn};
use wire::{Post, SearchQuery};

use crate::net::{Api, ApiError};
use crate::session::{SessionError, SessionProvider};
use crate::state::marker::MarkerPopup;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, Default)]
pub struct NearbyPosts {
    pub range_km: Option<f64>,
    pub loading: bool,
    pub error: Option<String>,
    markers: Vec<MarkerPopup>,
}

impl NearbyPosts {
    #[must_use]
    pub fn new(range_km: Option<f64>) -> Self {
        Self { range_km, ..Self::default() }
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerPopup] {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut [MarkerPopup] {
        &mut self.markers
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.markers.iter().map(MarkerPopup::post)
    }

    /// Query posts around the cached position and replace the list.
    /// On failure the previous list is kept and `error` is set.
    ///
    /// # Errors
    ///
    /// Missing session data or a failed search.
    pub async fn load<A, P>(&mut self, api: &A, session: &P) -> Result<(), LoadError>
    where
        A: Api + ?Sized,
        P: SessionProvider + ?Sized,
    {
        let center = session.position()?;
        let token = session.token()?;
        let query = SearchQuery { lat: center.lat, lon: center.lon, range: self.range_km };

        self.loading = true;
        let result = api.search(&token, query).await;
        self.loading = false;

        match result {
            Ok(posts) => {
                debug!(count = posts.len(), lat = center.lat, lon = center.lon, "loaded nearby posts");
                self.markers = posts.into_iter().map(MarkerPopup::new).collect();
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "loading nearby posts failed");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}
