//! Moonlight above the atmosphere.
//!
//! The Moon is modelled as a sphere of fixed albedo reflecting two sources:
//! direct sunlight scaled by the phase law, and Earthshine (sunlight reflected
//! by the Earth, itself phase dependent). Near full Moon the coherent
//! backscatter of the regolith adds the opposition surge.

use std::f64::consts::PI;
use std::sync::Arc;

use qtty::{Degree, Kilometers, Radians};

use super::phase::{phase_illumination, PHASE_EPSILON};
use super::solar::SOLAR_ILLUMINANCE_LUX;
use crate::astrometry::{angle_between, AstrometryProvider, BodyVectors};
use crate::error::AstrometryError;
use crate::time::TimeInstant;

/// Mean lunar radius in kilometres.
pub const MOON_RADIUS_KM: f64 = 1737.4;

/// Geometric albedo of the lunar surface.
pub const MOON_ALBEDO: f64 = 0.12;

/// Earthshine irradiance at full Earth phase, W/m².
pub const EARTHSHINE_MAX_IRRADIANCE: f64 = 0.095;

/// Solar irradiance at 1 au, W/m².
const SOLAR_IRRADIANCE: f64 = 1300.0;

/// Lambert-sphere geometric factor.
const LAMBERT_FACTOR: f64 = 2.0 / 3.0;

/// Phase angles up to this value get the opposition surge.
const SURGE_CUTOFF_DEG: f64 = 7.0;
const SURGE_PEAK: f64 = 1.27;
const SURGE_SLOPE: f64 = 0.045;

/// Everything the scene needs from one evaluation of the Moon model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonIllumination {
    /// Sun–Moon–Earth angle.
    pub phase_angle: Radians,
    /// Geocentric Earth–Moon distance.
    pub distance: Kilometers,
    /// Extraterrestrial illuminance at the Earth, lux.
    pub illuminance: f64,
}

/// Moon radiometric model backed by an astrometry provider.
#[derive(Clone)]
pub struct MoonModel {
    provider: Arc<dyn AstrometryProvider>,
}

impl MoonModel {
    pub fn new(provider: Arc<dyn AstrometryProvider>) -> Self {
        Self { provider }
    }

    /// Phase angle at `time`: 0 at full Moon, π at new Moon.
    pub fn phase_angle(&self, time: &TimeInstant) -> Result<Radians, AstrometryError> {
        let vectors = self.provider.vectors_at(time)?;
        Self::phase_angle_of(&vectors, time)
    }

    fn phase_angle_of(vectors: &BodyVectors, time: &TimeInstant) -> Result<Radians, AstrometryError> {
        let to_earth = vectors.earth - vectors.moon;
        let to_sun = vectors.sun - vectors.moon;

        angle_between(&to_earth, &to_sun)
            .map(Radians::new)
            .ok_or_else(|| {
                AstrometryError::Degenerate(format!(
                    "Moon coincides with the Earth or the Sun at JD {}",
                    time.julian_day()
                ))
            })
    }

    /// Brightness gain from coherent backscatter near full Moon.
    ///
    /// Falls linearly from 1.315 at 0° to 1 at 7°; beyond 7° the factor is
    /// exactly 1.
    pub fn opposition_surge(phase_angle: Radians) -> f64 {
        let deg = phase_angle.to::<Degree>().value().abs();
        if deg <= SURGE_CUTOFF_DEG {
            (SURGE_PEAK - SURGE_SLOPE * (deg - 1.0)).max(1.0)
        } else {
            1.0
        }
    }

    /// Earthshine irradiance on the Moon, W/m².
    ///
    /// The Earth's phase seen from the Moon is the supplement of the Moon's
    /// phase, so Earthshine peaks around new Moon.
    pub fn earthshine_irradiance(phase_angle: Radians) -> f64 {
        let earth_phase = PI - phase_angle.value();
        if earth_phase.abs() < PHASE_EPSILON || (PI - earth_phase).abs() < PHASE_EPSILON {
            return 0.0;
        }
        (EARTHSHINE_MAX_IRRADIANCE * phase_illumination(Radians::new(earth_phase))).max(0.0)
    }

    /// Illuminance of the Moon outside the atmosphere at `time`, lux.
    pub fn extraterrestrial_illuminance(&self, time: &TimeInstant) -> Result<f64, AstrometryError> {
        Ok(self.evaluate(time)?.illuminance)
    }

    /// Phase angle, distance and illuminance from a single geometry query.
    pub fn evaluate(&self, time: &TimeInstant) -> Result<MoonIllumination, AstrometryError> {
        let vectors = self.provider.vectors_at(time)?;
        let phase_angle = Self::phase_angle_of(&vectors, time)?;
        let distance = vectors.earth_moon_distance();

        Ok(MoonIllumination {
            phase_angle,
            distance,
            illuminance: Self::illuminance_for(phase_angle, distance),
        })
    }

    /// Moon illuminance for a given phase angle and Earth–Moon distance.
    pub fn illuminance_for(phase_angle: Radians, distance: Kilometers) -> f64 {
        let surge = Self::opposition_surge(phase_angle);
        let direct = SOLAR_ILLUMINANCE_LUX * phase_illumination(phase_angle);
        let earthshine =
            Self::earthshine_irradiance(phase_angle) * SOLAR_ILLUMINANCE_LUX / SOLAR_IRRADIANCE;
        let solid_angle = (MOON_RADIUS_KM / distance.value()).powi(2);

        let lux = LAMBERT_FACTOR * MOON_ALBEDO * surge * solid_angle * (direct + earthshine);
        if lux.is_finite() && lux >= 0.0 {
            lux
        } else {
            log::warn!(
                "non-finite Moon illuminance (phase {:.3}°, distance {:.1} km); using 0",
                phase_angle.to::<Degree>().value(),
                distance.value()
            );
            0.0
        }
    }
}

impl std::fmt::Debug for MoonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoonModel").finish_non_exhaustive()
    }
}
