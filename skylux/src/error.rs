//! Error types for skylux.
//!
//! The physical models themselves never fail: below-horizon bodies, exact
//! full/new Moon and similar cases are resolved numerically. Errors only come
//! from the edges of the crate: the astrometry provider rejecting its inputs,
//! time parsing, and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for skylux operations
pub type Result<T> = std::result::Result<T, SkyluxError>;

/// Errors raised by an astrometry provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstrometryError {
    /// Observer coordinates outside the geographic ranges.
    #[error("Invalid observer location: latitude={latitude}, longitude={longitude}")]
    InvalidObserver { latitude: f64, longitude: f64 },

    /// Geometry that cannot produce a direction (coincident bodies, zero vectors).
    #[error("Degenerate geometry: {0}")]
    Degenerate(String),

    /// Ephemeris evaluation failed or produced a non-finite value.
    #[error("Ephemeris error: {0}")]
    Ephemeris(String),
}

/// Errors raised while building a [`TimeInstant`](crate::time::TimeInstant).
#[derive(Debug, Error)]
pub enum TimeError {
    /// Text could not be parsed as an RFC 3339 timestamp.
    #[error("Invalid timestamp: {0}")]
    Parse(#[from] chrono::ParseError),

    /// Calendar components do not name a real UTC instant.
    #[error("Invalid calendar date: {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second}")]
    InvalidCalendar {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    },

    /// Julian Day that is not finite or cannot be represented as a UTC timestamp.
    #[error("Julian Day out of range: {0}")]
    OutOfRange(f64),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`SkyluxConfig`](crate::config::SkyluxConfig).
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting is present but out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A weather preset name that does not match any known preset.
    #[error("Unknown weather preset: {0}")]
    UnknownPreset(String),
}

/// Top-level error for skylux.
#[derive(Debug, Error)]
pub enum SkyluxError {
    #[error(transparent)]
    Astrometry(#[from] AstrometryError),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
