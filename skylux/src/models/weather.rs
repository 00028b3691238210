use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named atmospheric conditions with a representative Linke turbidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherPreset {
    /// Very clean mountain air.
    MountainClear,
    /// Typical clear sky.
    Standard,
    /// Light haze.
    LightHaze,
    /// Overcast or fog.
    OvercastFog,
}

static PRESET_NAMES: Lazy<HashMap<&'static str, WeatherPreset>> = Lazy::new(|| {
    HashMap::from([
        ("mountain-clear", WeatherPreset::MountainClear),
        ("mountain", WeatherPreset::MountainClear),
        ("clear", WeatherPreset::MountainClear),
        ("standard", WeatherPreset::Standard),
        ("light-haze", WeatherPreset::LightHaze),
        ("haze", WeatherPreset::LightHaze),
        ("overcast-fog", WeatherPreset::OvercastFog),
        ("overcast", WeatherPreset::OvercastFog),
        ("fog", WeatherPreset::OvercastFog),
    ])
});

impl WeatherPreset {
    pub const ALL: [WeatherPreset; 4] = [
        WeatherPreset::MountainClear,
        WeatherPreset::Standard,
        WeatherPreset::LightHaze,
        WeatherPreset::OvercastFog,
    ];

    /// Linke turbidity factor for this preset.
    pub fn turbidity(&self) -> f64 {
        match self {
            Self::MountainClear => 2.0,
            Self::Standard => 3.0,
            Self::LightHaze => 5.0,
            Self::OvercastFog => 20.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MountainClear => "Clear (mountains)",
            Self::Standard => "Standard",
            Self::LightHaze => "Light haze",
            Self::OvercastFog => "Overcast / fog",
        }
    }
}

impl fmt::Display for WeatherPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeatherPreset {
    type Err = ConfigError;

    /// Accepts kebab-case or snake_case names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        PRESET_NAMES
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}
