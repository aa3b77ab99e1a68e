//! Great-circle distance on a spherical-earth approximation.

use catalog::Coordinate;

/// Mean earth radius in kilometers (IUGG mean radius)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Distance in kilometers between two coordinates using the haversine
/// formula.
///
/// Symmetric, zero for identical inputs, and numerically stable for
/// antipodal and near-pole pairs: floating-point rounding can push the
/// haversine term a hair past 1.0, which would throw `asin` out of its
/// domain, so the term is clamped first.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
