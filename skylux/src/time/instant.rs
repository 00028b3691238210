use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::scales::{tt_minus_utc, SECONDS_PER_DAY};
use crate::error::TimeError;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Offset between Julian Day and Modified Julian Day.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Julian Day of J2000.0 (2000-01-01T12:00:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// A continuous instant on the UTC axis, stored as a Julian Day.
///
/// Every model call takes a `&TimeInstant`; the models derive whatever time
/// representation they need (Terrestrial Time for orbital terms, UT for
/// Earth rotation) from it.
///
/// # Examples
///
/// ```
/// use skylux::time::TimeInstant;
///
/// let t = TimeInstant::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
/// assert_eq!(t.julian_day(), 2_451_545.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TimeInstant(qtty::Days);

impl TimeInstant {
    /// Create an instant from a UTC Julian Day.
    pub fn new<V: Into<qtty::Days>>(jd_utc: V) -> Self {
        Self(jd_utc.into())
    }

    /// Create an instant from a UTC Modified Julian Day.
    pub fn from_mjd(mjd_utc: f64) -> Self {
        Self::new(mjd_utc + MJD_OFFSET)
    }

    /// Create an instant from a chrono UTC timestamp.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds =
            datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) * 1e-9;
        Self::new(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Create an instant from UTC calendar components.
    ///
    /// `second` may carry a fractional part but must lie in `[0, 60)`.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let invalid = || TimeError::InvalidCalendar {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };

        if !(0.0..60.0).contains(&second) {
            return Err(invalid());
        }

        let base = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or_else(invalid)?;
        let datetime = base
            .checked_add_signed(Duration::nanoseconds((second * 1e9).round() as i64))
            .ok_or_else(invalid)?;

        Ok(Self::from_utc(datetime))
    }

    /// Parse an RFC 3339 timestamp. Offsets other than `Z` are converted to UTC.
    pub fn parse(text: &str) -> Result<Self, TimeError> {
        let datetime = DateTime::parse_from_rfc3339(text.trim())?;
        Ok(Self::from_utc(datetime.with_timezone(&Utc)))
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// UTC Julian Day.
    pub fn julian_day(&self) -> f64 {
        self.0.value()
    }

    /// UTC Modified Julian Day.
    pub fn mjd(&self) -> f64 {
        self.julian_day() - MJD_OFFSET
    }

    /// Terrestrial Time Julian Day.
    pub fn tt_julian_day(&self) -> f64 {
        let jd_utc = self.julian_day();
        jd_utc + tt_minus_utc(jd_utc) / SECONDS_PER_DAY
    }

    /// Julian centuries of TT elapsed since J2000.0.
    pub fn tt_centuries_since_j2000(&self) -> f64 {
        (self.tt_julian_day() - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }

    /// Convert back to a chrono UTC timestamp, at millisecond resolution.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, TimeError> {
        let jd = self.julian_day();
        if !jd.is_finite() {
            return Err(TimeError::OutOfRange(jd));
        }

        // A JD near the present only resolves ~50 µs, so round to whole milliseconds.
        let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1e3).round();
        DateTime::from_timestamp_millis(millis as i64).ok_or(TimeError::OutOfRange(jd))
    }
}

impl From<DateTime<Utc>> for TimeInstant {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl FromStr for TimeInstant {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Ok(datetime) => write!(f, "{}", datetime.format("%Y-%m-%dT%H:%M:%SZ")),
            Err(_) => write!(f, "JD {}", self.julian_day()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_epoch_julian_day() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(TimeInstant::from_utc(epoch).julian_day(), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_j2000_from_calendar() {
        let t = TimeInstant::from_calendar(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_eq!(t.julian_day(), J2000_JD);
        assert!((t.mjd() - 51_544.5).abs() < 1e-9);
    }

    #[test]
    fn test_tt_is_ahead_of_utc() {
        let t = TimeInstant::from_calendar(2024, 10, 17, 11, 26, 0.0).unwrap();
        let offset_s = (t.tt_julian_day() - t.julian_day()) * SECONDS_PER_DAY;
        assert!((offset_s - 69.184).abs() < 1e-3, "TT - UTC = {offset_s}");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let utc = TimeInstant::parse("2025-06-21T11:00:00Z").unwrap();
        let cest = TimeInstant::parse("2025-06-21T13:00:00+02:00").unwrap();
        assert!((utc.julian_day() - cest.julian_day()).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            TimeInstant::parse("yesterday at noon"),
            Err(TimeError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_calendar() {
        assert!(TimeInstant::from_calendar(2024, 2, 30, 0, 0, 0.0).is_err());
        assert!(TimeInstant::from_calendar(2024, 2, 1, 0, 0, 61.0).is_err());
    }

    #[test]
    fn test_to_utc_round_trip_display() {
        let t = TimeInstant::from_calendar(2024, 10, 2, 18, 49, 0.0).unwrap();
        assert_eq!(t.to_string(), "2024-10-02T18:49:00Z");
    }

    #[test]
    fn test_to_utc_rejects_nan() {
        assert!(TimeInstant::new(f64::NAN).to_utc().is_err());
    }
}
