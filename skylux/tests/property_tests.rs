//! Property tests for the atmosphere, radiometric models and scene invariants.

use std::sync::Arc;

use proptest::prelude::*;
use qtty::{Degrees, Kilometers, Radians};
use skylux::algorithms::{phase_illumination, AtmosphereModel, MoonModel};
use skylux::astrometry::{AnalyticEphemeris, AstrometryProvider, FixedAstrometry};
use skylux::{IlluminationScene, Observer, TimeInstant};

const J2000: f64 = 2_451_545.0;

proptest! {
    #[test]
    fn transmittance_in_open_unit_interval(alt in 0.01f64..=90.0, turbidity in 0.0f64..40.0) {
        let t = AtmosphereModel::new().transmittance(Degrees::new(alt), turbidity);
        prop_assert!(t > 0.0 && t < 1.0, "alt={} T={} t={}", alt, turbidity, t);
    }

    #[test]
    fn transmittance_zero_below_horizon(alt in -90.0f64..=0.0, turbidity in 0.0f64..40.0) {
        prop_assert_eq!(AtmosphereModel::new().transmittance(Degrees::new(alt), turbidity), 0.0);
    }

    #[test]
    fn transmittance_decreases_with_turbidity(
        alt in 1.0f64..90.0,
        t1 in 1.9f64..30.0,
        delta in 0.1f64..10.0,
    ) {
        let atmosphere = AtmosphereModel::new();
        let clear = atmosphere.transmittance(Degrees::new(alt), t1);
        let hazy = atmosphere.transmittance(Degrees::new(alt), t1 + delta);
        prop_assert!(clear > hazy);
    }

    #[test]
    fn transmittance_increases_with_altitude(
        alt in 0.1f64..85.0,
        delta in 0.5f64..4.0,
        turbidity in 1.9f64..30.0,
    ) {
        let atmosphere = AtmosphereModel::new();
        let low = atmosphere.transmittance(Degrees::new(alt), turbidity);
        let high = atmosphere.transmittance(Degrees::new(alt + delta), turbidity);
        prop_assert!(high > low);
    }

    #[test]
    fn phase_function_bounded(angle in 0.0f64..=std::f64::consts::PI) {
        let f = phase_illumination(Radians::new(angle));
        prop_assert!((0.0..=1.0).contains(&f));
        let es = MoonModel::earthshine_irradiance(Radians::new(angle));
        prop_assert!(es >= 0.0 && es.is_finite());
    }

    #[test]
    fn moon_illuminance_finite_and_non_negative(
        angle in 0.0f64..=std::f64::consts::PI,
        distance in 356_000.0f64..407_000.0,
    ) {
        let lux = MoonModel::illuminance_for(Radians::new(angle), Kilometers::new(distance));
        prop_assert!(lux.is_finite() && lux >= 0.0);
        prop_assert!(lux < 0.5);
    }

    #[test]
    fn scene_total_is_exact_sum(
        sun_alt in -90.0f64..=90.0,
        moon_alt in -90.0f64..=90.0,
        phase in 0.0f64..=180.0,
        turbidity in 0.0f64..40.0,
    ) {
        let scene = IlluminationScene::new(Arc::new(
            FixedAstrometry::with_altitudes(sun_alt, moon_alt, phase, 384_400.0),
        ));
        let observer = Observer::new(0.0, 0.0, 0.0);
        let result = scene
            .calculate_illumination(&observer, &TimeInstant::new(J2000), turbidity)
            .unwrap();

        prop_assert_eq!(result.total_lux, result.sun_lux + result.moon_lux + result.stars_lux);
        for value in [result.sun_lux, result.moon_lux, result.stars_lux] {
            prop_assert!(value.is_finite() && value >= 0.0);
        }
        prop_assert!((0.0..=180.0).contains(&result.moon_phase_angle_deg));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn analytic_scene_is_well_formed(
        latitude in -90.0f64..=90.0,
        longitude in -180.0f64..=180.0,
        elevation in 0.0f64..5000.0,
        days in -36_525.0f64..36_525.0,
    ) {
        let scene = IlluminationScene::with_analytic_ephemeris();
        let observer = Observer::new(latitude, longitude, elevation);
        let time = TimeInstant::new(J2000 + days);
        let result = scene.calculate_illumination(&observer, &time, 3.0).unwrap();

        prop_assert!(result.total_lux.is_finite() && result.total_lux >= 0.0);
        prop_assert!(result.total_lux < 140_000.0);
        prop_assert!(result.sun_altitude_deg.abs() <= 90.0);
        prop_assert!(result.moon_altitude_deg.abs() <= 90.0);
        prop_assert!((0.0..=180.0).contains(&result.moon_phase_angle_deg));
    }

    #[test]
    fn moon_distance_stays_in_orbit_range(days in -36_525.0f64..36_525.0) {
        let vectors = AnalyticEphemeris::new()
            .vectors_at(&TimeInstant::new(J2000 + days))
            .unwrap();
        let km = vectors.earth_moon_distance().value();
        prop_assert!(km > 350_000.0 && km < 410_000.0, "{} km", km);
    }
}
