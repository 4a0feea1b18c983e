//! Pure geodesic helpers: great-circle distance and circle containment.
//! No database access, no side effects.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points using the haversine formula.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Circle containment test. The boundary is inclusive: a point at exactly
/// `radius_m` meters from the center counts as inside.
pub fn is_within(point: LatLng, center: LatLng, radius_m: f64) -> bool {
    distance_meters(point, center) <= radius_m
}
