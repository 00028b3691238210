//! Broadband atmospheric extinction at a single effective wavelength.
//!
//! Transmittance along the line of sight is `exp(−C·m)` where `m` is the
//! relative air mass and `C` the extinction coefficient, split into Rayleigh,
//! aerosol (Linke turbidity driven) and ozone parts.

use qtty::{Degrees, Radian};

/// Effective wavelength in micrometres (peak of photopic vision).
pub const EFFECTIVE_WAVELENGTH_UM: f64 = 0.555;

/// Below this altitude the air mass is treated as infinite.
pub const MIN_AIR_MASS_ALTITUDE_DEG: f64 = -0.5;

const RAYLEIGH_SCALE: f64 = 0.008735;
const RAYLEIGH_EXPONENT: f64 = -4.08;
const AEROSOL_SLOPE: f64 = 0.04608;
const AEROSOL_OFFSET: f64 = 0.04586;
const AEROSOL_EXPONENT: f64 = -1.3;
const OZONE_COEFFICIENT: f64 = 0.02975;

/// Atmospheric attenuation model.
///
/// Holds no state; all inputs are per call.
///
/// ```
/// use qtty::Degrees;
/// use skylux::algorithms::AtmosphereModel;
///
/// let atmosphere = AtmosphereModel::new();
/// let zenith = atmosphere.transmittance(Degrees::new(90.0), 3.0);
/// let low = atmosphere.transmittance(Degrees::new(10.0), 3.0);
/// assert!(zenith > low);
/// assert_eq!(atmosphere.transmittance(Degrees::new(-1.0), 3.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AtmosphereModel;

impl AtmosphereModel {
    pub fn new() -> Self {
        Self
    }

    /// Relative optical air mass (Kasten–Young form).
    ///
    /// Returns `f64::INFINITY` below −0.5° so that `exp(−C·m)` evaluates to
    /// exactly 0 instead of NaN.
    pub fn air_mass(&self, altitude: Degrees) -> f64 {
        let alt = altitude.value();
        if alt.is_nan() || alt < MIN_AIR_MASS_ALTITUDE_DEG {
            return f64::INFINITY;
        }

        let sin_alt = altitude.to::<Radian>().sin();
        let m = 1.0 / (sin_alt + 0.15 * (alt + 3.885).powf(-1.253));
        log::trace!("air mass at {alt:.3}°: {m:.4}");
        m
    }

    /// Total extinction coefficient for a Linke turbidity.
    pub fn extinction_coefficient(&self, turbidity: f64) -> f64 {
        let lambda = EFFECTIVE_WAVELENGTH_UM;
        let rayleigh = RAYLEIGH_SCALE * lambda.powf(RAYLEIGH_EXPONENT);
        let aerosol = (AEROSOL_SLOPE * turbidity - AEROSOL_OFFSET) * lambda.powf(AEROSOL_EXPONENT);
        let c = rayleigh + aerosol + OZONE_COEFFICIENT;
        log::trace!(
            "extinction T={turbidity}: rayleigh={rayleigh:.5} aerosol={aerosol:.5} total={c:.5}"
        );
        c
    }

    /// Fraction of light surviving the path to a body at `altitude`.
    ///
    /// 0 whenever the body is on or below the horizon; otherwise in `(0, 1)`.
    pub fn transmittance(&self, altitude: Degrees, turbidity: f64) -> f64 {
        if altitude.value().is_nan() || altitude.value() <= 0.0 {
            return 0.0;
        }

        let t = (-self.extinction_coefficient(turbidity) * self.air_mass(altitude)).exp();
        if t.is_finite() {
            t.clamp(0.0, 1.0)
        } else {
            log::warn!(
                "non-finite transmittance at {:.3}° with turbidity {turbidity}; using 0",
                altitude.value()
            );
            0.0
        }
    }

    /// Map meteorological visibility (km) to a Linke turbidity.
    pub fn turbidity_from_visibility(visibility_km: f64) -> f64 {
        match visibility_km {
            v if v > 100.0 => 2.0,
            v if v > 20.0 => 3.0,
            v if v > 10.0 => 4.0,
            v if v > 5.0 => 7.0,
            v if v > 2.0 => 15.0,
            _ => 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atmosphere() -> AtmosphereModel {
        AtmosphereModel::new()
    }

    #[test]
    fn test_air_mass_zenith_and_horizon() {
        let zenith = atmosphere().air_mass(Degrees::new(90.0));
        assert!((zenith - 1.0).abs() < 0.01, "{zenith}");

        let horizon = atmosphere().air_mass(Degrees::new(0.0));
        assert!((30.0..=40.0).contains(&horizon), "{horizon}");
    }

    #[test]
    fn test_air_mass_below_cutoff_is_infinite() {
        assert!(atmosphere().air_mass(Degrees::new(-0.6)).is_infinite());
        assert!(atmosphere().air_mass(Degrees::new(-0.4)).is_finite());
    }

    #[test]
    fn test_extinction_reference_value() {
        let c = atmosphere().extinction_coefficient(2.2);
        assert!((0.18..=0.25).contains(&c), "{c}");
    }

    #[test]
    fn test_transmittance_zero_at_or_below_horizon() {
        assert_eq!(atmosphere().transmittance(Degrees::new(0.0), 3.0), 0.0);
        assert_eq!(atmosphere().transmittance(Degrees::new(-0.3), 3.0), 0.0);
        assert_eq!(atmosphere().transmittance(Degrees::new(-45.0), 3.0), 0.0);
    }

    #[test]
    fn test_transmittance_in_open_unit_interval() {
        for alt in [0.1, 1.0, 10.0, 45.0, 90.0] {
            for turbidity in [1.9, 3.0, 20.0, 30.0] {
                let t = atmosphere().transmittance(Degrees::new(alt), turbidity);
                assert!(t > 0.0 && t < 1.0, "alt={alt} T={turbidity} t={t}");
            }
        }
    }

    #[test]
    fn test_haze_reduces_transmittance() {
        let clear = atmosphere().transmittance(Degrees::new(30.0), 2.0);
        let fog = atmosphere().transmittance(Degrees::new(30.0), 20.0);
        assert!(clear > fog);
    }

    #[test]
    fn test_turbidity_from_visibility_steps() {
        assert_eq!(AtmosphereModel::turbidity_from_visibility(150.0), 2.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(100.0), 3.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(25.0), 3.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(15.0), 4.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(8.0), 7.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(3.0), 15.0);
        assert_eq!(AtmosphereModel::turbidity_from_visibility(1.0), 30.0);
    }
}
