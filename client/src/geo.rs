//! Location jitter applied before a position leaves the device.

use rand::Rng;
use wire::Location;

/// Offset `value` by `magnitude * (2r - 1)`.
///
/// For `r` in `[0, 1)` the result lies in `[value - magnitude, value + magnitude)`.
#[must_use]
pub fn jitter(value: f64, magnitude: f64, r: f64) -> f64 {
    value + magnitude * (2.0 * r - 1.0)
}

/// Bring a point back onto the globe: latitude is clamped to `[-90, 90]`,
/// longitude wraps around into `[-180, 180)`.
#[must_use]
pub fn normalize(location: Location) -> Location {
    let lon = if (-180.0..=180.0).contains(&location.lon) {
        location.lon
    } else {
        (location.lon + 180.0).rem_euclid(360.0) - 180.0
    };
    Location { lat: location.lat.clamp(-90.0, 90.0), lon }
}

/// Jitter latitude and longitude with independent uniform draws.
///
/// The result is normalized, so a position near a pole or the antimeridian
/// still yields valid coordinates.
pub fn jitter_location<R: Rng + ?Sized>(location: Location, magnitude: f64, rng: &mut R) -> Location {
    normalize(Location {
        lat: jitter(location.lat, magnitude, rng.random::<f64>()),
        lon: jitter(location.lon, magnitude, rng.random::<f64>()),
    })
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
