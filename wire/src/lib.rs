//! Shared wire model for the Around service and its clients.
//!
//! This crate owns the JSON shapes exchanged over HTTP (posts, locations,
//! credentials, search parameters) plus the route and multipart field names
//! both sides must agree on. Distance math lives here so the server's radius
//! search and any client-side filtering measure the same way.

use serde::{Deserialize, Serialize};

// =============================================================================
// ROUTES & FIELD NAMES
// =============================================================================

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const POST_PATH: &str = "/post";
pub const SEARCH_PATH: &str = "/search";
pub const IMAGES_PATH: &str = "/images";

/// Multipart field names of a post-creation request.
pub mod fields {
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";
    pub const MESSAGE: &str = "message";
    pub const IMAGE: &str = "image";
}

/// Search radius used when a query omits `range`.
pub const DEFAULT_RANGE_KM: f64 = 200.0;

/// Mean Earth radius (IUGG), in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Error returned by [`Location::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("latitude out of range: {0}")]
    Latitude(f64),
    #[error("longitude out of range: {0}")]
    Longitude(f64),
}

// =============================================================================
// LOCATION
// =============================================================================

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Build a location, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if `lat` is outside `[-90, 90]` or `lon`
    /// outside `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::Latitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(LocationError::Longitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Great-circle distance to `other` in kilometres (haversine).
    #[must_use]
    pub fn distance_km(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

// =============================================================================
// POST
// =============================================================================

/// A geotagged post as returned by `/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub user: String,
    pub message: String,
    /// Public URL of the attached image.
    #[serde(default)]
    pub url: String,
    pub location: Location,
}

impl Post {
    /// Caption shown under the image in a marker popup.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{}: {}", self.user, self.message)
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// JSON body of `/signup` and `/login`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// SEARCH
// =============================================================================

/// Query string of `/search`. `range` is in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,
}

impl SearchQuery {
    #[must_use]
    pub fn center(&self) -> Location {
        Location { lat: self.lat, lon: self.lon }
    }

    /// Requested radius, falling back to [`DEFAULT_RANGE_KM`] when absent or
    /// not a positive finite number.
    #[must_use]
    pub fn range_km(&self) -> f64 {
        match self.range {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ => DEFAULT_RANGE_KM,
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
