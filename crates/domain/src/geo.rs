//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LatitudeOutOfRange`] or
    /// [`ValidationError::LongitudeOutOfRange`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Haversine distance to `other`, in meters.
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // clamp guards asin against rounding just above 1.0 for antipodal points
        2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn should_return_zero_for_identical_points() {
        let point = Coordinate::new(35.058_564_5, -106.572_495_7);
        assert_close(point.distance_to(&point), 0.0, 1e-9);
    }

    #[test]
    fn should_be_symmetric() {
        let a = Coordinate::new(37.553_441, -122.290_524);
        let b = Coordinate::new(37.553_363, -122.290_883);
        assert_close(a.distance_to(&b), b.distance_to(&a), 1e-9);
    }

    #[test]
    fn should_measure_one_degree_of_latitude() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        // 2πR / 360
        assert_close(a.distance_to(&b), 111_195.08, 0.1);
    }

    #[test]
    fn should_measure_short_distances_in_meters() {
        // 0.0001° of latitude ≈ 11.12 m
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(10.0001, 20.0);
        assert_close(a.distance_to(&b), 11.12, 0.01);
    }

    #[test]
    fn should_handle_antipodal_points() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        assert_close(a.distance_to(&b), std::f64::consts::PI * EARTH_RADIUS_METERS, 1.0);
    }

    #[test]
    fn should_accept_boundary_coordinates() {
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn should_reject_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(90.5, 0.0).validate(),
            Err(ValidationError::LatitudeOutOfRange(90.5))
        );
    }

    #[test]
    fn should_reject_out_of_range_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -180.5).validate(),
            Err(ValidationError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn should_reject_non_finite_components() {
        assert!(Coordinate::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).validate().is_err());
    }
}
