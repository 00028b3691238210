//! Scene compositor.
//!
//! Queries the provider once per call for each body position and once for
//! the phase geometry, then combines source brightness, atmospheric transmittance and
//! the horizontal-plane projection `max(0, sin(altitude))` of each source:
//!
//! ```text
//! sun_lux   = E_sun  · t(alt_sun)  · max(0, sin alt_sun)
//! moon_lux  = E_moon · t(alt_moon) · max(0, sin alt_moon)
//! stars_lux = E_star · t(90°)
//! total_lux = sun_lux + moon_lux + stars_lux
//! ```

use std::sync::Arc;

use qtty::{Degree, Degrees, Radian};

use crate::algorithms::lunar::MoonIllumination;
use crate::algorithms::{AtmosphereModel, MoonModel, SunModel};
use crate::astrometry::{AnalyticEphemeris, AstrometryProvider, Body, BodyPosition};
use crate::error::AstrometryError;
use crate::models::{IlluminationResult, Observer, WeatherPreset};
use crate::time::TimeInstant;

/// Linke turbidity of a typical clear sky.
pub const DEFAULT_TURBIDITY: f64 = 3.0;

/// Integrated background starlight above the atmosphere, lux.
pub const STAR_ILLUMINANCE_EXO_LUX: f64 = 0.000_271_4;

/// Geometry and source brightness for one observer and instant.
///
/// Independent of turbidity, so one geometry serves every weather preset.
#[derive(Debug, Clone, Copy)]
struct SceneGeometry {
    sun: BodyPosition,
    moon_position: BodyPosition,
    sun_exo_lux: f64,
    moon: MoonIllumination,
}

/// Illumination engine: provider plus radiometric and atmospheric models.
///
/// Cheap to clone and safe to share between threads.
///
/// ```
/// use skylux::models::Observer;
/// use skylux::services::IlluminationScene;
/// use skylux::time::TimeInstant;
///
/// let scene = IlluminationScene::with_analytic_ephemeris();
/// let prague = Observer::new(50.0755, 14.4378, 200.0);
/// let noon = TimeInstant::parse("2025-06-21T11:00:00Z").unwrap();
///
/// let result = scene.calculate_illumination(&prague, &noon, 3.0).unwrap();
/// assert!(result.sun_lux > 50_000.0);
/// assert_eq!(result.total_lux, result.sun_lux + result.moon_lux + result.stars_lux);
/// ```
#[derive(Clone)]
pub struct IlluminationScene {
    provider: Arc<dyn AstrometryProvider>,
    atmosphere: AtmosphereModel,
    sun: SunModel,
    moon: MoonModel,
}

impl IlluminationScene {
    pub fn new(provider: Arc<dyn AstrometryProvider>) -> Self {
        Self {
            atmosphere: AtmosphereModel::new(),
            sun: SunModel::new(Arc::clone(&provider)),
            moon: MoonModel::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Scene backed by the built-in [`AnalyticEphemeris`].
    pub fn with_analytic_ephemeris() -> Self {
        Self::new(Arc::new(AnalyticEphemeris::new()))
    }

    pub fn atmosphere(&self) -> &AtmosphereModel {
        &self.atmosphere
    }

    /// Illuminance at `observer` and `time` for a Linke `turbidity`.
    ///
    /// Fails only when the provider rejects the observer or the instant.
    pub fn calculate_illumination(
        &self,
        observer: &Observer,
        time: &TimeInstant,
        turbidity: f64,
    ) -> Result<IlluminationResult, AstrometryError> {
        let geometry = self.geometry(observer, time)?;
        Ok(self.compose(&geometry, turbidity))
    }

    /// [`calculate_illumination`](Self::calculate_illumination) with [`DEFAULT_TURBIDITY`].
    pub fn calculate_default(
        &self,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<IlluminationResult, AstrometryError> {
        self.calculate_illumination(observer, time, DEFAULT_TURBIDITY)
    }

    /// One result per [`WeatherPreset`], in [`WeatherPreset::ALL`] order.
    ///
    /// The geometry is evaluated once and shared across presets.
    pub fn calculate_for_presets(
        &self,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<Vec<(WeatherPreset, IlluminationResult)>, AstrometryError> {
        let geometry = self.geometry(observer, time)?;
        Ok(WeatherPreset::ALL
            .iter()
            .map(|&preset| (preset, self.compose(&geometry, preset.turbidity())))
            .collect())
    }

    fn geometry(
        &self,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<SceneGeometry, AstrometryError> {
        let sun = self.position(Body::Sun, observer, time)?;
        let moon_position = self.position(Body::Moon, observer, time)?;
        let moon = self.moon.evaluate(time).inspect_err(|e| {
            log::warn!("Moon geometry unavailable at {time}: {e}");
        })?;

        Ok(SceneGeometry {
            sun,
            moon_position,
            sun_exo_lux: self.sun.extraterrestrial_illuminance(time),
            moon,
        })
    }

    fn position(
        &self,
        body: Body,
        observer: &Observer,
        time: &TimeInstant,
    ) -> Result<BodyPosition, AstrometryError> {
        self.provider
            .position_of(body, observer, time)
            .inspect_err(|e| log::warn!("{body} position unavailable at {time}: {e}"))
    }

    fn compose(&self, geometry: &SceneGeometry, turbidity: f64) -> IlluminationResult {
        let sun_lux = geometry.sun_exo_lux
            * self.atmosphere.transmittance(geometry.sun.altitude, turbidity)
            * horizontal_projection(geometry.sun.altitude);
        let moon_lux = geometry.moon.illuminance
            * self.atmosphere.transmittance(geometry.moon_position.altitude, turbidity)
            * horizontal_projection(geometry.moon_position.altitude);
        let stars_lux =
            STAR_ILLUMINANCE_EXO_LUX * self.atmosphere.transmittance(Degrees::new(90.0), turbidity);

        log::debug!(
            "T={turbidity}: sun={sun_lux:.6} lx (alt {:.2}°), moon={moon_lux:.6} lx (alt {:.2}°), stars={stars_lux:.6} lx",
            geometry.sun.altitude.value(),
            geometry.moon_position.altitude.value()
        );

        IlluminationResult {
            total_lux: sun_lux + moon_lux + stars_lux,
            sun_lux,
            moon_lux,
            stars_lux,
            sun_altitude_deg: geometry.sun.altitude.value(),
            moon_altitude_deg: geometry.moon_position.altitude.value(),
            moon_phase_angle_deg: geometry
                .moon
                .phase_angle
                .to::<Degree>()
                .value()
                .clamp(0.0, 180.0),
        }
    }
}

impl Default for IlluminationScene {
    fn default() -> Self {
        Self::with_analytic_ephemeris()
    }
}

impl std::fmt::Debug for IlluminationScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IlluminationScene")
            .field("atmosphere", &self.atmosphere)
            .finish_non_exhaustive()
    }
}

/// Cosine factor onto a horizontal surface, 0 for bodies below the horizon.
fn horizontal_projection(altitude: Degrees) -> f64 {
    altitude.to::<Radian>().sin().max(0.0)
}
