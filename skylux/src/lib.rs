//! skylux: outdoor illuminance estimation.
//!
//! Estimates the illuminance (lux) on a horizontal surface at a ground
//! observer, split into Sun, Moon and background-starlight contributions,
//! each attenuated by atmospheric extinction.
//!
//! # Modules
//!
//! - [`algorithms`]: atmosphere, Sun, Moon and phase-law models
//! - [`astrometry`]: the [`AstrometryProvider`](astrometry::AstrometryProvider)
//!   trait, an analytic Sun/Moon ephemeris and a fixed-geometry provider
//! - [`services`]: the [`IlluminationScene`] compositor
//! - [`models`]: observer, weather presets and result records
//! - [`time`]: UTC instants and the TT time scale
//! - [`config`]: `skylux.toml` loading
//!
//! # Example
//!
//! ```
//! use skylux::{IlluminationScene, Observer, TimeInstant};
//!
//! let scene = IlluminationScene::default();
//! let observer = Observer::new(50.0755, 14.4378, 200.0);
//! let time = TimeInstant::parse("2024-10-17T23:00:00Z").unwrap();
//!
//! let result = scene.calculate_illumination(&observer, &time, 3.0).unwrap();
//! println!("{:.3} lx ({})", result.total_lux, result.condition());
//! ```

pub mod algorithms;
pub mod astrometry;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time;

#[cfg(feature = "python")]
pub mod python;

pub use config::SkyluxConfig;
pub use error::{AstrometryError, ConfigError, Result, SkyluxError, TimeError};
pub use models::{IlluminationResult, LightCondition, Observer, WeatherPreset};
pub use services::{IlluminationScene, DEFAULT_TURBIDITY};
pub use time::TimeInstant;
