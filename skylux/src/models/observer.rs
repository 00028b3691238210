use qtty::{Degrees, Meters};
use serde::{Deserialize, Serialize};

use crate::error::AstrometryError;

/// A ground observer: geodetic latitude/longitude and elevation above sea level.
///
/// Latitude is positive north, longitude positive east. The illumination core
/// never validates these values; providers call [`Observer::validate`] before
/// computing positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation_m: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, elevation_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation_m,
        }
    }

    /// Latitude (degrees, +N).
    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.latitude)
    }

    /// Longitude (degrees, +E).
    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.longitude)
    }

    /// Elevation above sea level.
    pub fn elevation(&self) -> Meters {
        Meters::new(self.elevation_m)
    }

    /// Check latitude ∈ [-90, 90], longitude ∈ [-180, 180] and finite elevation.
    pub fn validate(&self) -> Result<(), AstrometryError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);

        if lat_ok && lon_ok && self.elevation_m.is_finite() {
            Ok(())
        } else {
            Err(AstrometryError::InvalidObserver {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let prague = Observer::new(50.0755, 14.4378, 200.0);
        assert_eq!(prague.latitude().value(), 50.0755);
        assert_eq!(prague.longitude().value(), 14.4378);
        assert_eq!(prague.elevation().value(), 200.0);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Observer::new(90.0, -180.0, 0.0).validate().is_ok());
        assert!(Observer::new(-90.0, 180.0, -430.0).validate().is_ok());
        assert!(Observer::new(90.5, 0.0, 0.0).validate().is_err());
        assert!(Observer::new(0.0, 181.0, 0.0).validate().is_err());
        assert!(Observer::new(f64::NAN, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_deserialize_without_elevation() {
        let observer: Observer =
            serde_json::from_str(r#"{"latitude": 28.7624, "longitude": -17.8892}"#).unwrap();
        assert_eq!(observer.elevation().value(), 0.0);
    }
}
