//! Time handling for the illumination models.
//!
//! [`TimeInstant`] is the opaque instant passed into every model call. It is
//! built from chrono UTC timestamps and exposes the UTC and Terrestrial Time
//! Julian Days the models need.

pub mod instant;
pub mod scales;

pub use instant::{TimeInstant, DAYS_PER_JULIAN_CENTURY, J2000_JD, MJD_OFFSET, UNIX_EPOCH_JD};
pub use scales::{tai_minus_utc, tt_minus_utc, SECONDS_PER_DAY};
