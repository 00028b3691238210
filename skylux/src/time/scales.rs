//! UTC → TT offsets, backed by `hifitime`'s leap-second table.

use hifitime::Epoch;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT − TAI, fixed by definition.
pub const TT_MINUS_TAI_SECS: f64 = 32.184;

/// Leap seconds (TAI − UTC) in effect at a UTC Julian Day.
///
/// Zero before 1972-01-01, where IERS leap seconds start, and for a
/// non-finite day.
pub fn tai_minus_utc(jd_utc: f64) -> f64 {
    if !jd_utc.is_finite() {
        return 0.0;
    }
    Epoch::from_jde_utc(jd_utc).leap_seconds(true).unwrap_or(0.0)
}

/// TT − UTC in seconds at a UTC Julian Day.
pub fn tt_minus_utc(jd_utc: f64) -> f64 {
    tai_minus_utc(jd_utc) + TT_MINUS_TAI_SECS
}
