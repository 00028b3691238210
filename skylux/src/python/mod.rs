//! Python bindings.
//!
//! Built with the `python` feature; exposes the `skylux` extension module.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use qtty::Degrees;

use crate::algorithms::AtmosphereModel;
use crate::models::Observer;
use crate::services::{IlluminationScene, DEFAULT_TURBIDITY};
use crate::time::TimeInstant;

/// Compute scene illuminance with the analytic ephemeris.
///
/// Returns a dict with `total_lux`, `sun_lux`, `moon_lux`, `stars_lux`,
/// `sun_altitude_deg`, `moon_altitude_deg`, `moon_phase_angle_deg` and
/// `condition`.
#[pyfunction]
#[pyo3(signature = (latitude, longitude, elevation_m, iso_time, turbidity = DEFAULT_TURBIDITY))]
pub fn calculate_illumination(
    py: Python<'_>,
    latitude: f64,
    longitude: f64,
    elevation_m: f64,
    iso_time: &str,
    turbidity: f64,
) -> PyResult<Py<PyDict>> {
    let time = TimeInstant::parse(iso_time).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let observer = Observer::new(latitude, longitude, elevation_m);

    let result = IlluminationScene::with_analytic_ephemeris()
        .calculate_illumination(&observer, &time, turbidity)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let dict = PyDict::new(py);
    dict.set_item("total_lux", result.total_lux)?;
    dict.set_item("sun_lux", result.sun_lux)?;
    dict.set_item("moon_lux", result.moon_lux)?;
    dict.set_item("stars_lux", result.stars_lux)?;
    dict.set_item("sun_altitude_deg", result.sun_altitude_deg)?;
    dict.set_item("moon_altitude_deg", result.moon_altitude_deg)?;
    dict.set_item("moon_phase_angle_deg", result.moon_phase_angle_deg)?;
    dict.set_item("condition", result.condition().label())?;
    Ok(dict.unbind())
}

/// Atmospheric transmittance for a body at `altitude_deg`.
#[pyfunction]
pub fn transmittance(altitude_deg: f64, turbidity: f64) -> f64 {
    AtmosphereModel::new().transmittance(Degrees::new(altitude_deg), turbidity)
}

/// Linke turbidity for a meteorological visibility in kilometres.
#[pyfunction]
pub fn turbidity_from_visibility(visibility_km: f64) -> f64 {
    AtmosphereModel::turbidity_from_visibility(visibility_km)
}

#[pymodule]
fn skylux(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(calculate_illumination, m)?)?;
    m.add_function(wrap_pyfunction!(transmittance, m)?)?;
    m.add_function(wrap_pyfunction!(turbidity_from_visibility, m)?)?;
    m.add("DEFAULT_TURBIDITY", DEFAULT_TURBIDITY)?;
    Ok(())
}
