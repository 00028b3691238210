//! Body positions and geometry consumed by the illumination models.
//!
//! The illumination core never computes an ephemeris itself. It asks an
//! [`AstrometryProvider`] for:
//!
//! - topocentric altitude/azimuth/distance of the Sun and the Moon,
//! - Sun, Moon and Earth position vectors in a common frame (phase geometry),
//! - the Terrestrial Time Julian Day of an instant.
//!
//! Two providers ship with the crate:
//!
//! - [`AnalyticEphemeris`]: closed-form low-precision solar and lunar theory,
//!   good to a fraction of a degree, needs no data files.
//! - [`FixedAstrometry`]: returns caller-supplied geometry, for tests and
//!   synthetic scenes.

pub mod ephemeris;
pub mod fixed;
pub mod vector;

pub use ephemeris::AnalyticEphemeris;
pub use fixed::FixedAstrometry;
pub use vector::{angle_between, Vector3};

use std::fmt;

use qtty::{AstronomicalUnit, AstronomicalUnits, Degrees, Kilometers};
use serde::{Deserialize, Serialize};

use crate::error::AstrometryError;
use crate::models::Observer;
use crate::time::TimeInstant;

/// Bodies the illumination models need positions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sun => f.write_str("Sun"),
            Body::Moon => f.write_str("Moon"),
        }
    }
}

/// Apparent topocentric position of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Altitude above the horizon (negative below).
    pub altitude: Degrees,
    /// Azimuth measured from north through east, in `[0, 360)`.
    pub azimuth: Degrees,
    /// Observer–body distance.
    pub distance: Kilometers,
}

impl BodyPosition {
    pub fn new(altitude: Degrees, azimuth: Degrees, distance: Kilometers) -> Self {
        Self {
            altitude,
            azimuth,
            distance,
        }
    }

    pub fn distance_au(&self) -> AstronomicalUnits {
        self.distance.to::<AstronomicalUnit>()
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude.value() > 0.0
    }
}

/// Sun, Moon and Earth positions in one frame, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyVectors {
    pub sun: Vector3,
    pub moon: Vector3,
    pub earth: Vector3,
}

impl BodyVectors {
    /// Earth–Moon centre distance.
    pub fn earth_moon_distance(&self) -> Kilometers {
        Kilometers::new((self.moon - self.earth).norm())
    }

    /// Earth–Sun centre distance.
    pub fn earth_sun_distance(&self) -> Kilometers {
        Kilometers::new((self.sun - self.earth).norm())
    }

    /// Geometry check shared by every consumer: all components finite.
    pub fn is_finite(&self) -> bool {
        [self.sun, self.moon, self.earth]
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite()))
    }

    /// The Earth–Sun distance in astronomical units.
    pub fn earth_sun_distance_au(&self) -> AstronomicalUnits {
        self.earth_sun_distance().to::<AstronomicalUnit>()
    }
}

/// Source of body positions for the illumination models.
///
/// Implementations must be safe to share across threads: any ephemeris data
/// is loaded at construction and read-only afterwards.
pub trait AstrometryProvider: Send + Sync {
    /// Apparent altitude, azimuth and distance of `body` for `observer` at `time`.
    fn position_of(
        &self,
        body: Body,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<BodyPosition, AstrometryError>;

    /// Sun, Moon and Earth position vectors at `time`.
    fn vectors_at(&self, time: &TimeInstant) -> Result<BodyVectors, AstrometryError>;

    /// Terrestrial Time Julian Day of `time`.
    fn julian_day(&self, time: &TimeInstant) -> f64 {
        time.tt_julian_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_au() {
        let pos = BodyPosition::new(
            Degrees::new(45.0),
            Degrees::new(180.0),
            Kilometers::new(149_597_870.7),
        );
        assert!((pos.distance_au().value() - 1.0).abs() < 1e-9);
        assert!(pos.is_above_horizon());
    }

    #[test]
    fn test_vector_distances() {
        let vectors = BodyVectors {
            sun: Vector3::new(149_597_870.7, 0.0, 0.0),
            moon: Vector3::new(0.0, 384_400.0, 0.0),
            earth: Vector3::zeros(),
        };
        assert_eq!(vectors.earth_moon_distance().value(), 384_400.0);
        assert!((vectors.earth_sun_distance_au().value() - 1.0).abs() < 1e-9);
        assert!(vectors.is_finite());
    }

    #[test]
    fn test_body_display() {
        assert_eq!(Body::Sun.to_string(), "Sun");
        assert_eq!(Body::Moon.to_string(), "Moon");
    }
}
