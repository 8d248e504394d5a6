//! Geographic primitives: lat/lon points and city-scale distance.

use serde::{Deserialize, Serialize};

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.0;

/// A WGS84-ish coordinate pair. Field names match the wire schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Flat-earth distance between two points in kilometers.
///
/// Latitude delta scales by 111 km/degree; longitude delta additionally by the
/// cosine of the mean latitude; the two are combined with a Euclidean norm.
/// Good enough for city-scale distances (< 50 km); callers must not assume
/// geodesic accuracy beyond that.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_diff = (b.latitude - a.latitude) * KM_PER_DEGREE;
    let mean_lat = ((a.latitude + b.latitude) / 2.0).to_radians();
    let lon_diff = (b.longitude - a.longitude) * KM_PER_DEGREE * mean_lat.cos();
    (lat_diff * lat_diff + lon_diff * lon_diff).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(40.7484, -73.9857);
        assert_eq!(distance_km(a, b), distance_km(b, a));
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = GeoPoint::new(40.0, -74.0);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_111_km() {
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(41.0, -74.0);
        assert!((distance_km(a, b) - KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        let north = distance_km(GeoPoint::new(60.0, 0.0), GeoPoint::new(60.0, 1.0));
        assert!((equator - KM_PER_DEGREE).abs() < 1e-9);
        assert!(north < equator / 1.9, "cos(60°) ≈ 0.5 should roughly halve it");
    }
}
