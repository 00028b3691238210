//! Configuration file support.
//!
//! Settings are read from `skylux.toml` and may be overridden by
//! `SKYLUX_*` environment variables. Every section is optional; a missing
//! file section falls back to the Prague observer and a standard atmosphere.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithms::AtmosphereModel;
use crate::error::ConfigError;
use crate::models::{Observer, WeatherPreset};
use crate::services::DEFAULT_TURBIDITY;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "skylux.toml";

const ENV_LATITUDE: &str = "SKYLUX_LATITUDE";
const ENV_LONGITUDE: &str = "SKYLUX_LONGITUDE";
const ENV_ELEVATION: &str = "SKYLUX_ELEVATION_M";
const ENV_TURBIDITY: &str = "SKYLUX_TURBIDITY";

/// Complete skylux configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkyluxConfig {
    #[serde(default)]
    pub observer: ObserverSettings,
    #[serde(default)]
    pub atmosphere: AtmosphereSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Observer location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverSettings {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_elevation")]
    pub elevation_m: f64,
}

/// Atmospheric conditions. At most one of these is used; see
/// [`SkyluxConfig::resolved_turbidity`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSettings {
    #[serde(default)]
    pub turbidity: Option<f64>,
    #[serde(default)]
    pub visibility_km: Option<f64>,
    #[serde(default)]
    pub preset: Option<String>,
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_latitude() -> f64 {
    50.0755
}

fn default_longitude() -> f64 {
    14.4378
}

fn default_elevation() -> f64 {
    200.0
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            elevation_m: default_elevation(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl SkyluxConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SkyluxConfig = toml::from_str(&content)?;
        log::debug!("Parsed configuration from {}", path.display());
        Ok(config)
    }

    /// First existing `skylux.toml` among the standard locations:
    /// 1. Current directory
    /// 2. `skylux/` directory
    /// 3. Parent directory
    pub fn default_location() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("skylux").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration from [`default_location`](Self::default_location).
    ///
    /// Returns `Ok(None)` when no file exists in any of them.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        match Self::default_location() {
            Some(path) => Self::from_file(path).map(Some),
            None => {
                log::debug!("No {CONFIG_FILE_NAME} found in standard locations");
                Ok(None)
            }
        }
    }

    /// Apply `SKYLUX_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup, e.g. a map in tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Result<Option<f64>, ConfigError> {
            match lookup(key) {
                Some(raw) => raw.trim().parse::<f64>().map(Some).map_err(|_| {
                    ConfigError::Invalid(format!("{key} must be a number, got '{raw}'"))
                }),
                None => Ok(None),
            }
        };

        if let Some(latitude) = parse(ENV_LATITUDE)? {
            self.observer.latitude = latitude;
        }
        if let Some(longitude) = parse(ENV_LONGITUDE)? {
            self.observer.longitude = longitude;
        }
        if let Some(elevation) = parse(ENV_ELEVATION)? {
            self.observer.elevation_m = elevation;
        }
        if let Some(turbidity) = parse(ENV_TURBIDITY)? {
            self.atmosphere.turbidity = Some(turbidity);
        }
        Ok(())
    }

    /// Check ranges and that the preset name, if any, is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let observer = &self.observer;
        if !(observer.latitude.is_finite() && (-90.0..=90.0).contains(&observer.latitude)) {
            return Err(ConfigError::Invalid(format!(
                "observer.latitude must be within [-90, 90], got {}",
                observer.latitude
            )));
        }
        if !(observer.longitude.is_finite() && (-180.0..=180.0).contains(&observer.longitude)) {
            return Err(ConfigError::Invalid(format!(
                "observer.longitude must be within [-180, 180], got {}",
                observer.longitude
            )));
        }
        if !observer.elevation_m.is_finite() {
            return Err(ConfigError::Invalid(
                "observer.elevation_m must be finite".to_string(),
            ));
        }

        if let Some(turbidity) = self.atmosphere.turbidity {
            if !(turbidity.is_finite() && turbidity >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "atmosphere.turbidity must be finite and >= 0, got {turbidity}"
                )));
            }
        }
        if let Some(visibility) = self.atmosphere.visibility_km {
            if !(visibility.is_finite() && visibility > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "atmosphere.visibility_km must be > 0, got {visibility}"
                )));
            }
        }
        self.preset()?;
        Ok(())
    }

    /// The configured weather preset, if one is named.
    pub fn preset(&self) -> Result<Option<WeatherPreset>, ConfigError> {
        self.atmosphere
            .preset
            .as_deref()
            .map(str::parse::<WeatherPreset>)
            .transpose()
    }

    /// Turbidity to use: explicit value, then visibility, then preset, then
    /// [`DEFAULT_TURBIDITY`].
    pub fn resolved_turbidity(&self) -> Result<f64, ConfigError> {
        if let Some(turbidity) = self.atmosphere.turbidity {
            return Ok(turbidity);
        }
        if let Some(visibility) = self.atmosphere.visibility_km {
            return Ok(AtmosphereModel::turbidity_from_visibility(visibility));
        }
        Ok(self
            .preset()?
            .map_or(DEFAULT_TURBIDITY, |preset| preset.turbidity()))
    }

    pub fn observer(&self) -> Observer {
        Observer::new(
            self.observer.latitude,
            self.observer.longitude,
            self.observer.elevation_m,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [observer]
            latitude = 28.7624
            longitude = -17.8892
            elevation_m = 2396.0

            [atmosphere]
            visibility_km = 50.0

            [output]
            format = "json"
            log_level = "debug"
        "#;

        let config: SkyluxConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.observer.elevation_m, 2396.0);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.log_level, "debug");
        assert_eq!(config.resolved_turbidity().unwrap(), 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SkyluxConfig = toml::from_str("").unwrap();
        assert_eq!(config, SkyluxConfig::default());
        assert_eq!(config.observer().latitude().value(), 50.0755);
        assert_eq!(config.resolved_turbidity().unwrap(), DEFAULT_TURBIDITY);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_turbidity_precedence() {
        let mut config = SkyluxConfig::default();
        config.atmosphere.preset = Some("haze".to_string());
        assert_eq!(config.resolved_turbidity().unwrap(), 5.0);

        config.atmosphere.visibility_km = Some(3.0);
        assert_eq!(config.resolved_turbidity().unwrap(), 15.0);

        config.atmosphere.turbidity = Some(2.5);
        assert_eq!(config.resolved_turbidity().unwrap(), 2.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SkyluxConfig::default();
        config.observer.latitude = 95.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SkyluxConfig::default();
        config.atmosphere.turbidity = Some(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SkyluxConfig::default();
        config.atmosphere.visibility_km = Some(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SkyluxConfig::default();
        config.atmosphere.preset = Some("drizzle".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SKYLUX_LATITUDE", "-24.6272"),
            ("SKYLUX_TURBIDITY", " 2.0 "),
        ]);

        let mut config = SkyluxConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.observer.latitude, -24.6272);
        assert_eq!(config.observer.longitude, 14.4378);
        assert_eq!(config.atmosphere.turbidity, Some(2.0));
    }

    #[test]
    fn test_override_must_be_numeric() {
        let mut config = SkyluxConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "SKYLUX_ELEVATION_M").then(|| "high".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
