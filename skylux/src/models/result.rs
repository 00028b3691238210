use std::fmt;

use serde::{Deserialize, Serialize};

/// Illuminance thresholds (lux) separating the [`LightCondition`] classes.
const DAYLIGHT_CLEAR_LUX: f64 = 1000.0;
const DAYLIGHT_OVERCAST_LUX: f64 = 100.0;
const TWILIGHT_LUX: f64 = 1.0;
const MOONLIT_NIGHT_LUX: f64 = 0.1;

/// Scene illuminance at the observer, decomposed by source.
///
/// `total_lux` is always exactly `sun_lux + moon_lux + stars_lux`; every
/// illuminance field is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IlluminationResult {
    pub total_lux: f64,
    pub sun_lux: f64,
    pub moon_lux: f64,
    pub stars_lux: f64,
    pub sun_altitude_deg: f64,
    pub moon_altitude_deg: f64,
    /// Sun–Moon–Earth angle: 0° full Moon, 180° new Moon.
    pub moon_phase_angle_deg: f64,
}

impl IlluminationResult {
    /// Coarse lighting class of the total illuminance.
    pub fn condition(&self) -> LightCondition {
        LightCondition::from_lux(self.total_lux)
    }

    /// Fraction of the total contributed by the Moon, 0 when the scene is black.
    pub fn moon_fraction(&self) -> f64 {
        if self.total_lux > 0.0 {
            self.moon_lux / self.total_lux
        } else {
            0.0
        }
    }
}

/// Coarse classification of outdoor illuminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightCondition {
    /// More than 1000 lx.
    DaylightClear,
    /// 100–1000 lx.
    DaylightOvercast,
    /// 1–100 lx.
    Twilight,
    /// 0.1–1 lx, typically a bright Moon.
    MoonlitNight,
    /// Below 0.1 lx.
    DarkNight,
}

impl LightCondition {
    pub fn from_lux(total_lux: f64) -> Self {
        if total_lux > DAYLIGHT_CLEAR_LUX {
            Self::DaylightClear
        } else if total_lux > DAYLIGHT_OVERCAST_LUX {
            Self::DaylightOvercast
        } else if total_lux > TWILIGHT_LUX {
            Self::Twilight
        } else if total_lux > MOONLIT_NIGHT_LUX {
            Self::MoonlitNight
        } else {
            Self::DarkNight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DaylightClear => "Daylight (clear)",
            Self::DaylightOvercast => "Daylight (overcast / dusk)",
            Self::Twilight => "Twilight",
            Self::MoonlitNight => "Night (moonlit)",
            Self::DarkNight => "Night (dark)",
        }
    }

    pub fn is_night(&self) -> bool {
        matches!(self, Self::MoonlitNight | Self::DarkNight)
    }
}

impl fmt::Display for LightCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_total(sun: f64, moon: f64, stars: f64) -> IlluminationResult {
        IlluminationResult {
            total_lux: sun + moon + stars,
            sun_lux: sun,
            moon_lux: moon,
            stars_lux: stars,
            sun_altitude_deg: -30.0,
            moon_altitude_deg: 40.0,
            moon_phase_angle_deg: 3.0,
        }
    }

    #[test]
    fn test_condition_thresholds() {
        assert_eq!(LightCondition::from_lux(50_000.0), LightCondition::DaylightClear);
        assert_eq!(LightCondition::from_lux(1000.0), LightCondition::DaylightOvercast);
        assert_eq!(LightCondition::from_lux(20.0), LightCondition::Twilight);
        assert_eq!(LightCondition::from_lux(0.25), LightCondition::MoonlitNight);
        assert_eq!(LightCondition::from_lux(0.1), LightCondition::DarkNight);
        assert_eq!(LightCondition::from_lux(0.0), LightCondition::DarkNight);
    }

    #[test]
    fn test_moonlit_result() {
        let result = result_with_total(0.0, 0.2, 0.0002);
        assert_eq!(result.condition(), LightCondition::MoonlitNight);
        assert!(result.condition().is_night());
        assert!(result.moon_fraction() > 0.99);
    }

    #[test]
    fn test_moon_fraction_of_black_scene() {
        let result = result_with_total(0.0, 0.0, 0.0);
        assert_eq!(result.moon_fraction(), 0.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(result_with_total(1.0, 0.0, 0.0)).unwrap();
        for key in [
            "total_lux",
            "sun_lux",
            "moon_lux",
            "stars_lux",
            "sun_altitude_deg",
            "moon_altitude_deg",
            "moon_phase_angle_deg",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(
            serde_json::to_value(LightCondition::MoonlitNight).unwrap(),
            "moonlit_night"
        );
    }
}
