//! Coordinate checks run before any upstream request.
//!
//! The archive covers the whole globe, but thresholds and the Oslo day
//! boundary only make sense for Norway, so requests are limited to a box
//! around the mainland.

use crate::types::{Location, WeatherError};

pub const NORWAY_MIN_LATITUDE: f64 = 58.0;
pub const NORWAY_MAX_LATITUDE: f64 = 72.0;
pub const NORWAY_MIN_LONGITUDE: f64 = 4.0;
pub const NORWAY_MAX_LONGITUDE: f64 = 32.0;

/// Accept finite coordinates inside the Norway bounding box (inclusive).
pub fn validate_norway(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(WeatherError::InvalidCoordinates(format!(
            "latitude {} / longitude {} must be finite numbers",
            latitude, longitude
        )));
    }

    let lat_ok = (NORWAY_MIN_LATITUDE..=NORWAY_MAX_LATITUDE).contains(&latitude);
    let lon_ok = (NORWAY_MIN_LONGITUDE..=NORWAY_MAX_LONGITUDE).contains(&longitude);
    if !lat_ok || !lon_ok {
        return Err(WeatherError::OutsideNorway {
            latitude,
            longitude,
        });
    }

    Ok(())
}

impl Location {
    pub fn validate(&self) -> Result<(), WeatherError> {
        validate_norway(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oslo_is_valid() {
        assert!(validate_norway(59.9139, 10.7522).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(validate_norway(58.0, 4.0).is_ok());
        assert!(validate_norway(72.0, 32.0).is_ok());
    }

    #[test]
    fn test_outside_box() {
        assert!(matches!(
            validate_norway(57.99, 10.0),
            Err(WeatherError::OutsideNorway { .. })
        ));
        assert!(matches!(
            validate_norway(60.0, 32.01),
            Err(WeatherError::OutsideNorway { .. })
        ));
        // Stockholm
        assert!(validate_norway(59.33, 18.07).is_ok());
        // Berlin
        assert!(validate_norway(52.52, 13.40).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            validate_norway(f64::NAN, 10.0),
            Err(WeatherError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            validate_norway(60.0, f64::INFINITY),
            Err(WeatherError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_location_validate() {
        assert!(Location::named(69.65, 18.96, "Tromsø").validate().is_ok());
        assert!(Location::new(0.0, 0.0).validate().is_err());
    }
}
