//! Orchestration of the radiometric models into scene results.

pub mod scene;

pub use scene::{IlluminationScene, DEFAULT_TURBIDITY, STAR_ILLUMINANCE_EXO_LUX};
