//! Closed-form low-precision ephemeris for the Sun and the Moon.
//!
//! Positions follow the classical analytic theories:
//!
//! - Sun: mean elements plus equation of centre, corrected for nutation and
//!   annual aberration. Good to ~0.01°.
//! - Moon: principal periodic terms of the lunar theory in longitude,
//!   latitude and distance, with the Venus/Jupiter/flattening corrections.
//!   Good to ~0.01° in longitude and a few kilometres in distance.
//!
//! Topocentric positions subtract the observer's geocentric vector (WGS-84
//! ellipsoid, elevation included) from the body's geocentric equatorial
//! vector, so lunar parallax is handled exactly. No refraction is applied.

use qtty::{AstronomicalUnits, Degrees, Kilometers};

use super::vector::{ecliptic_to_equatorial, from_spherical, Vector3};
use super::{AstrometryProvider, Body, BodyPosition, BodyVectors};
use crate::error::AstrometryError;
use crate::models::Observer;
use crate::time::{TimeInstant, DAYS_PER_JULIAN_CENTURY, J2000_JD};

const AU_KM: f64 = 149_597_870.7;
const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563;
const MOON_MEAN_DISTANCE_KM: f64 = 385_000.56;
/// Constant of annual aberration, degrees.
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Lunar longitude and distance terms: multiples of (D, M, M', F),
/// longitude coefficient (1e-6 deg), distance coefficient (1e-3 km).
#[rustfmt::skip]
const MOON_LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
    (2, 1, 1, 0, -810.0, 2_616.0),
    (4, -1, -2, 0, 759.0, -1_897.0),
    (0, 2, -1, 0, -713.0, -2_117.0),
    (2, 2, -1, 0, -700.0, 2_354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1_423.0),
    (0, 0, 4, 0, 537.0, -1_117.0),
    (4, -1, 0, 0, 520.0, -1_571.0),
    (1, 0, -2, 0, -487.0, -1_739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4_421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1_165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8_752.0),
];

/// Lunar latitude terms: multiples of (D, M, M', F), coefficient (1e-6 deg).
#[rustfmt::skip]
const MOON_LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 30] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
];

/// Geocentric ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EclipticPosition {
    longitude_deg: f64,
    latitude_deg: f64,
    distance_km: f64,
}

impl EclipticPosition {
    fn to_vector(self) -> Vector3 {
        from_spherical(
            self.longitude_deg.to_radians(),
            self.latitude_deg.to_radians(),
            self.distance_km,
        )
    }
}

/// Nutation in longitude and obliquity, degrees.
#[derive(Debug, Clone, Copy)]
struct Nutation {
    longitude_deg: f64,
    obliquity_deg: f64,
}

fn normalize_deg(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

fn sin_deg(angle: f64) -> f64 {
    angle.to_radians().sin()
}

fn cos_deg(angle: f64) -> f64 {
    angle.to_radians().cos()
}

fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291_111 - 0.013_004_167 * t - 1.639e-7 * t * t + 5.036e-7 * t * t * t
}

/// Principal nutation terms, ~0.5" accuracy.
fn nutation(t: f64) -> Nutation {
    let omega = 125.044_52 - 1_934.136_261 * t;
    let sun_mean = 280.4665 + 36_000.7698 * t;
    let moon_mean = 218.3165 + 481_267.8813 * t;

    let longitude_arcsec = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * sun_mean)
        - 0.23 * sin_deg(2.0 * moon_mean)
        + 0.21 * sin_deg(2.0 * omega);
    let obliquity_arcsec = 9.20 * cos_deg(omega)
        + 0.57 * cos_deg(2.0 * sun_mean)
        + 0.10 * cos_deg(2.0 * moon_mean)
        - 0.09 * cos_deg(2.0 * omega);

    Nutation {
        longitude_deg: longitude_arcsec / 3600.0,
        obliquity_deg: obliquity_arcsec / 3600.0,
    }
}

/// Geometric Sun, true longitude and radius vector.
fn sun_geometric(t: f64) -> EclipticPosition {
    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let centre = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(mean_anomaly)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * mean_anomaly)
        + 0.000_289 * sin_deg(3.0 * mean_anomaly);

    let true_anomaly = mean_anomaly + centre;
    let radius_au = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * cos_deg(true_anomaly));

    EclipticPosition {
        longitude_deg: normalize_deg(mean_longitude + centre),
        latitude_deg: 0.0,
        distance_km: radius_au * AU_KM,
    }
}

/// Geometric Moon, mean ecliptic and equinox of date.
fn moon_geometric(t: f64) -> EclipticPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_longitude =
        218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2
        + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let latitude_argument = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2
        - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let argument = |d: i8, m: i8, mp: i8, f: i8| {
        f64::from(d) * elongation
            + f64::from(m) * sun_anomaly
            + f64::from(mp) * moon_anomaly
            + f64::from(f) * latitude_argument
    };
    // Terms involving the Sun's anomaly shrink with the decreasing eccentricity.
    let eccentricity_factor = |m: i8| e.powi(i32::from(m.abs()));

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(d, m, mp, f, l_coef, r_coef) in &MOON_LONGITUDE_DISTANCE_TERMS {
        let arg = argument(d, m, mp, f);
        let scale = eccentricity_factor(m);
        sum_l += l_coef * scale * sin_deg(arg);
        sum_r += r_coef * scale * cos_deg(arg);
    }

    let mut sum_b = 0.0;
    for &(d, m, mp, f, b_coef) in &MOON_LATITUDE_TERMS {
        sum_b += b_coef * eccentricity_factor(m) * sin_deg(argument(d, m, mp, f));
    }

    sum_l += 3958.0 * sin_deg(a1)
        + 1962.0 * sin_deg(mean_longitude - latitude_argument)
        + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(mean_longitude)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - latitude_argument)
        + 175.0 * sin_deg(a1 + latitude_argument)
        + 127.0 * sin_deg(mean_longitude - moon_anomaly)
        - 115.0 * sin_deg(mean_longitude + moon_anomaly);

    EclipticPosition {
        longitude_deg: normalize_deg(mean_longitude + sum_l / 1e6),
        latitude_deg: sum_b / 1e6,
        distance_km: MOON_MEAN_DISTANCE_KM + sum_r / 1e3,
    }
}

/// Greenwich mean sidereal time in degrees for a UT Julian Day.
fn greenwich_mean_sidereal_deg(jd_ut: f64) -> f64 {
    let days = jd_ut - J2000_JD;
    let t = days / DAYS_PER_JULIAN_CENTURY;
    normalize_deg(
        280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Geocentric position of the observer in the true equator of date, km.
fn observer_vector(observer: &Observer, local_sidereal_rad: f64) -> Vector3 {
    let lat = observer.latitude().value().to_radians();
    let height_ratio = observer.elevation().value() / 1000.0 / EARTH_EQUATORIAL_RADIUS_KM;
    let axis_ratio = 1.0 - EARTH_FLATTENING;

    let u = (axis_ratio * lat.sin()).atan2(lat.cos());
    let rho_sin = axis_ratio * u.sin() + height_ratio * lat.sin();
    let rho_cos = u.cos() + height_ratio * lat.cos();

    Vector3::new(
        EARTH_EQUATORIAL_RADIUS_KM * rho_cos * local_sidereal_rad.cos(),
        EARTH_EQUATORIAL_RADIUS_KM * rho_cos * local_sidereal_rad.sin(),
        EARTH_EQUATORIAL_RADIUS_KM * rho_sin,
    )
}

/// Analytic Sun/Moon ephemeris.
///
/// Stateless and `Copy`; construct once and share freely.
///
/// ```
/// use skylux::astrometry::{AnalyticEphemeris, AstrometryProvider, Body};
/// use skylux::models::Observer;
/// use skylux::time::TimeInstant;
///
/// let ephemeris = AnalyticEphemeris::new();
/// let prague = Observer::new(50.0755, 14.4378, 200.0);
/// let t = TimeInstant::parse("2025-06-21T11:00:00Z").unwrap();
///
/// let sun = ephemeris.position_of(Body::Sun, &prague, &t).unwrap();
/// assert!(sun.altitude.value() > 60.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Earth–Sun distance at `time`.
    pub fn sun_earth_distance(&self, time: &TimeInstant) -> AstronomicalUnits {
        let sun = sun_geometric(time.tt_centuries_since_j2000());
        AstronomicalUnits::new(sun.distance_km / AU_KM)
    }

    /// Apparent geocentric ecliptic position of date.
    fn apparent_ecliptic(&self, body: Body, t: f64, nutation: &Nutation) -> EclipticPosition {
        match body {
            Body::Sun => {
                let mut sun = sun_geometric(t);
                let aberration = ABERRATION_DEG * AU_KM / sun.distance_km;
                sun.longitude_deg =
                    normalize_deg(sun.longitude_deg + nutation.longitude_deg - aberration);
                sun
            }
            Body::Moon => {
                let mut moon = moon_geometric(t);
                moon.longitude_deg = normalize_deg(moon.longitude_deg + nutation.longitude_deg);
                moon
            }
        }
    }
}

impl AstrometryProvider for AnalyticEphemeris {
    fn position_of(
        &self,
        body: Body,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<BodyPosition, AstrometryError> {
        observer.validate()?;

        let t = time.tt_centuries_since_j2000();
        let nutation = nutation(t);
        let obliquity = (mean_obliquity_deg(t) + nutation.obliquity_deg).to_radians();

        let ecliptic = self.apparent_ecliptic(body, t, &nutation).to_vector();
        let geocentric = ecliptic_to_equatorial(&ecliptic, obliquity);

        // UT1 − UTC stays below 0.9 s, so UTC stands in for UT1.
        let apparent_sidereal =
            greenwich_mean_sidereal_deg(time.julian_day()) + nutation.longitude_deg * obliquity.cos();
        let local_sidereal = (apparent_sidereal + observer.longitude().value()).to_radians();

        let topocentric = geocentric - observer_vector(observer, local_sidereal);
        let distance = topocentric.norm();
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(AstrometryError::Ephemeris(format!(
                "non-finite {body} distance at JD {}",
                time.julian_day()
            )));
        }

        let right_ascension = topocentric.y.atan2(topocentric.x);
        let declination = (topocentric.z / distance).asin();
        let hour_angle = local_sidereal - right_ascension;

        let (sin_lat, cos_lat) = observer.latitude().sin_cos();
        let (sin_dec, cos_dec) = declination.sin_cos();
        let (sin_ha, cos_ha) = hour_angle.sin_cos();

        let altitude = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha)
            .clamp(-1.0, 1.0)
            .asin();
        let azimuth = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * cos_ha * sin_lat);

        log::trace!(
            "{body}: alt={:.4} az={:.4} dist={:.1} km",
            altitude.to_degrees(),
            normalize_deg(azimuth.to_degrees()),
            distance
        );

        Ok(BodyPosition::new(
            Degrees::new(altitude.to_degrees()),
            Degrees::new(normalize_deg(azimuth.to_degrees())),
            Kilometers::new(distance),
        ))
    }

    fn vectors_at(&self, time: &TimeInstant) -> Result<BodyVectors, AstrometryError> {
        let t = time.tt_centuries_since_j2000();
        let nutation = nutation(t);

        let vectors = BodyVectors {
            sun: self.apparent_ecliptic(Body::Sun, t, &nutation).to_vector(),
            moon: self.apparent_ecliptic(Body::Moon, t, &nutation).to_vector(),
            earth: Vector3::zeros(),
        };

        if vectors.is_finite() {
            Ok(vectors)
        } else {
            Err(AstrometryError::Ephemeris(format!(
                "non-finite body vectors at JD {}",
                time.julian_day()
            )))
        }
    }
}
