use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn jitter_endpoints() {
    assert!((jitter(10.0, 0.5, 0.0) - 9.5).abs() < 1e-12);
    assert!((jitter(10.0, 0.5, 0.5) - 10.0).abs() < 1e-12);
    assert!(jitter(10.0, 0.5, 0.999_999) < 10.5);
}

#[test]
fn jitter_zero_magnitude_is_identity() {
    assert!((jitter(-33.86, 0.0, 0.73) + 33.86).abs() < f64::EPSILON);
}

#[test]
fn jittered_coordinates_stay_in_half_open_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let origin = Location { lat: 37.4219, lon: -122.084 };

    for magnitude in [0.001, 0.02, 1.0, 10.0] {
        for _ in 0..5_000 {
            let shaken = jitter_location(origin, magnitude, &mut rng);
            assert!(shaken.lat >= origin.lat - magnitude && shaken.lat < origin.lat + magnitude);
            assert!(shaken.lon >= origin.lon - magnitude && shaken.lon < origin.lon + magnitude);
        }
    }
}

#[test]
fn jitter_near_pole_and_antimeridian_stays_on_the_globe() {
    let mut rng = StdRng::seed_from_u64(11);
    let corner = Location { lat: 89.995, lon: 179.995 };

    for _ in 0..1_000 {
        let shaken = jitter_location(corner, crate::config::LOC_SHAKE, &mut rng);
        assert!(Location::new(shaken.lat, shaken.lon).is_ok(), "{shaken:?}");
    }
}

#[test]
fn normalize_clamps_latitude_and_wraps_longitude() {
    let n = normalize(Location { lat: 90.01, lon: 180.01 });
    assert!((n.lat - 90.0).abs() < f64::EPSILON);
    assert!((n.lon + 179.99).abs() < 1e-9);

    let n = normalize(Location { lat: -90.5, lon: -180.25 });
    assert!((n.lat + 90.0).abs() < f64::EPSILON);
    assert!((n.lon - 179.75).abs() < 1e-9);

    let inside = Location { lat: 12.5, lon: 180.0 };
    assert_eq!(normalize(inside), inside);
}

#[test]
fn jitter_covers_both_sides_of_origin() {
    let mut rng = StdRng::seed_from_u64(42);
    let origin = Location { lat: 0.0, lon: 0.0 };
    let samples: Vec<Location> = (0..1_000).map(|_| jitter_location(origin, 0.02, &mut rng)).collect();

    assert!(samples.iter().any(|l| l.lat < 0.0));
    assert!(samples.iter().any(|l| l.lat > 0.0));
    assert!(samples.iter().any(|l| l.lon < 0.0));
    assert!(samples.iter().any(|l| l.lon > 0.0));
}

#[test]
fn lat_and_lon_draw_independently() {
    let mut rng = StdRng::seed_from_u64(3);
    let origin = Location { lat: 0.0, lon: 0.0 };
    let differs = (0..100)
        .map(|_| jitter_location(origin, 1.0, &mut rng))
        .any(|l| (l.lat - l.lon).abs() > 1e-9);
    assert!(differs);
}
