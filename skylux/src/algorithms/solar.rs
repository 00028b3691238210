//! Extraterrestrial solar illuminance.

use std::f64::consts::TAU;
use std::sync::Arc;

use crate::astrometry::AstrometryProvider;
use crate::time::TimeInstant;

/// Solar illuminance at the top of the atmosphere at 1 au, lux.
pub const SOLAR_ILLUMINANCE_LUX: f64 = 127_500.0;

/// Eccentricity of the Earth's orbit used by the distance correction.
pub const ORBIT_ECCENTRICITY: f64 = 0.01672;

/// Anomalistic period approximation in days.
const ORBIT_PERIOD_DAYS: f64 = 365.2;

/// Day offset of perihelion in the cosine term.
const PERIHELION_OFFSET_DAYS: f64 = 2.0;

/// Sun radiometric model.
///
/// The Julian Day comes from the provider so that a fixed-geometry provider
/// can pin the Earth–Sun distance correction as well.
#[derive(Clone)]
pub struct SunModel {
    provider: Arc<dyn AstrometryProvider>,
}

impl SunModel {
    pub fn new(provider: Arc<dyn AstrometryProvider>) -> Self {
        Self { provider }
    }

    /// Illuminance outside the atmosphere at `time`, corrected for the
    /// Earth–Sun distance.
    pub fn extraterrestrial_illuminance(&self, time: &TimeInstant) -> f64 {
        Self::illuminance_at_julian_day(self.provider.julian_day(time))
    }

    /// Same as [`SunModel::extraterrestrial_illuminance`] for a TT Julian Day.
    pub fn illuminance_at_julian_day(jd_tt: f64) -> f64 {
        let orbit = 1.0
            + ORBIT_ECCENTRICITY
                * (TAU * (jd_tt - PERIHELION_OFFSET_DAYS) / ORBIT_PERIOD_DAYS).cos();
        SOLAR_ILLUMINANCE_LUX * orbit * orbit / (1.0 - ORBIT_ECCENTRICITY * ORBIT_ECCENTRICITY)
    }
}

impl std::fmt::Debug for SunModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SunModel").finish_non_exhaustive()
    }
}
