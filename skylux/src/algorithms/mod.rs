//! Radiometric and atmospheric models.
//!
//! Every function here is pure: no provider calls except through
//! [`MoonModel`], which needs the Sun/Moon/Earth geometry for its phase angle.

pub mod atmosphere;
pub mod lunar;
pub mod phase;
pub mod solar;

pub use atmosphere::AtmosphereModel;
pub use lunar::MoonModel;
pub use phase::phase_illumination;
pub use solar::SunModel;
