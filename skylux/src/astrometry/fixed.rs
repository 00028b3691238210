use qtty::{Degrees, Kilometers};

use super::vector::{from_spherical, Vector3};
use super::{AstrometryProvider, Body, BodyPosition, BodyVectors};
use crate::error::AstrometryError;
use crate::models::Observer;
use crate::time::TimeInstant;

/// Mean Earth–Sun distance (1 au) in kilometres.
const MEAN_SUN_DISTANCE_KM: f64 = 149_597_870.7;

/// Mean Earth–Moon distance in kilometres.
const MEAN_MOON_DISTANCE_KM: f64 = 384_400.0;

/// Provider returning fixed, caller-supplied geometry regardless of observer or time.
///
/// Useful to drive the illumination models through specific configurations
/// (Moon at zenith, exact full Moon, Sun on the horizon) without an ephemeris.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedAstrometry {
    sun: BodyPosition,
    moon: BodyPosition,
    vectors: BodyVectors,
}

impl FixedAstrometry {
    pub fn new(sun: BodyPosition, moon: BodyPosition, vectors: BodyVectors) -> Self {
        Self { sun, moon, vectors }
    }

    /// Sun and Moon at the given altitudes (azimuth 180°) with the Moon at a
    /// given phase angle and Earth distance.
    ///
    /// The vectors put the Earth at the origin, the Sun on +X at 1 au and the
    /// Moon so that the Sun–Moon–Earth angle equals `phase_angle_deg`.
    pub fn with_altitudes(
        sun_altitude_deg: f64,
        moon_altitude_deg: f64,
        phase_angle_deg: f64,
        moon_distance_km: f64,
    ) -> Self {
        let sun = BodyPosition::new(
            Degrees::new(sun_altitude_deg),
            Degrees::new(180.0),
            Kilometers::new(MEAN_SUN_DISTANCE_KM),
        );
        let moon = BodyPosition::new(
            Degrees::new(moon_altitude_deg),
            Degrees::new(180.0),
            Kilometers::new(moon_distance_km),
        );
        Self::new(
            sun,
            moon,
            Self::phase_vectors(phase_angle_deg, moon_distance_km),
        )
    }

    /// Vectors placing the Moon at elongation `180° − phase` from the Sun.
    ///
    /// The Sun–Moon–Earth angle then matches `phase_angle_deg` up to the
    /// small parallax of the Moon's distance against the Sun's.
    pub fn phase_vectors(phase_angle_deg: f64, moon_distance_km: f64) -> BodyVectors {
        let elongation = (180.0 - phase_angle_deg).to_radians();
        BodyVectors {
            sun: Vector3::new(MEAN_SUN_DISTANCE_KM, 0.0, 0.0),
            moon: from_spherical(elongation, 0.0, moon_distance_km),
            earth: Vector3::zeros(),
        }
    }
}

impl Default for FixedAstrometry {
    /// Sun well below the horizon, quarter Moon at 45°.
    fn default() -> Self {
        Self::with_altitudes(-30.0, 45.0, 90.0, MEAN_MOON_DISTANCE_KM)
    }
}

impl AstrometryProvider for FixedAstrometry {
    fn position_of(
        &self,
        body: Body,
        _observer: &Observer,
        _time: &TimeInstant,
    ) -> Result<BodyPosition, AstrometryError> {
        Ok(match body {
            Body::Sun => self.sun,
            Body::Moon => self.moon,
        })
    }

    fn vectors_at(&self, _time: &TimeInstant) -> Result<BodyVectors, AstrometryError> {
        Ok(self.vectors)
    }
}
