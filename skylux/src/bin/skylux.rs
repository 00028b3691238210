//! skylux command-line report.
//!
//! Usage:
//!
//! ```text
//! skylux [TIME|now] [--config PATH] [--json]
//! ```
//!
//! `TIME` is an RFC 3339 timestamp (converted to UTC). Without a config file
//! the observer defaults to Prague.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter (default: `output.log_level` from the config)
//! - `SKYLUX_LATITUDE`, `SKYLUX_LONGITUDE`, `SKYLUX_ELEVATION_M`,
//!   `SKYLUX_TURBIDITY`: override the config file

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skylux::config::{OutputFormat, SkyluxConfig, CONFIG_FILE_NAME};
use skylux::{IlluminationResult, IlluminationScene, Observer, TimeInstant, WeatherPreset};

#[derive(Debug, Default)]
struct CliArgs {
    time: Option<String>,
    config: Option<PathBuf>,
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("usage: skylux [TIME|now] [--config PATH] [--json]");
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            other => {
                if parsed.time.is_some() {
                    bail!("unexpected argument: {other}");
                }
                parsed.time = Some(other.to_string());
            }
        }
    }
    Ok(parsed)
}

#[derive(Debug, Serialize)]
struct PresetReport {
    preset: WeatherPreset,
    turbidity: f64,
    result: IlluminationResult,
}

#[derive(Debug, Serialize)]
struct Report {
    time: String,
    observer: Observer,
    turbidity: f64,
    result: IlluminationResult,
    presets: Vec<PresetReport>,
}

/// Effective configuration and the file it came from, if any.
#[derive(Debug)]
struct LoadedConfig {
    config: SkyluxConfig,
    source: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<LoadedConfig> {
    let source = path.cloned().or_else(SkyluxConfig::default_location);
    let mut config = match &source {
        Some(path) => SkyluxConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SkyluxConfig::default(),
    };
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(LoadedConfig { config, source })
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn print_text(report: &Report) {
    let r = &report.result;
    println!("=== Illumination report ===");
    println!("Time:     {}", report.time);
    println!(
        "Observer: {:.4}°, {:.4}°, {:.0} m",
        report.observer.latitude().value(),
        report.observer.longitude().value(),
        report.observer.elevation().value()
    );
    println!("Sun altitude:     {:>8.2}°", r.sun_altitude_deg);
    println!("Moon altitude:    {:>8.2}°", r.moon_altitude_deg);
    println!("Moon phase angle: {:>8.2}°", r.moon_phase_angle_deg);
    println!();
    println!("Turbidity {:.1}:", report.turbidity);
    println!("  Total: {:.6} lx ({})", r.total_lux, r.condition());
    println!("  Sun:   {:.6} lx", r.sun_lux);
    println!("  Moon:  {:.6} lx", r.moon_lux);
    println!("  Stars: {:.6} lx", r.stars_lux);
    println!();
    println!("{:<20} {:>6} {:>14}  Condition", "Preset", "T", "Total [lx]");
    for entry in &report.presets {
        println!(
            "{:<20} {:>6.1} {:>14.6}  {}",
            entry.preset.label(),
            entry.turbidity,
            entry.result.total_lux,
            entry.result.condition()
        );
    }
}

fn main() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let LoadedConfig { config, source } = load_config(args.config.as_ref())?;
    init_logging(&config.output.log_level);
    match &source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => info!("No {CONFIG_FILE_NAME} found, using defaults"),
    }

    let time = match args.time.as_deref() {
        None | Some("now") => TimeInstant::now(),
        Some(text) => TimeInstant::parse(text).with_context(|| format!("parsing time '{text}'"))?,
    };
    let observer = config.observer();
    let turbidity = config.resolved_turbidity()?;
    info!("Computing illumination at {time} for turbidity {turbidity}");

    let scene = IlluminationScene::with_analytic_ephemeris();
    let result = scene.calculate_illumination(&observer, &time, turbidity)?;
    let presets = scene
        .calculate_for_presets(&observer, &time)?
        .into_iter()
        .map(|(preset, result)| PresetReport {
            preset,
            turbidity: preset.turbidity(),
            result,
        })
        .collect();

    let report = Report {
        time: time.to_string(),
        observer,
        turbidity,
        result,
        presets,
    };

    if args.json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["2024-10-17T11:26:00Z", "--json", "--config", "x.toml"]).unwrap();
        assert_eq!(parsed.time.as_deref(), Some("2024-10-17T11:26:00Z"));
        assert!(parsed.json);
        assert_eq!(parsed.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&["--config"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["now", "later"]).is_err());
    }

    #[test]
    fn test_load_config_reports_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\nlog_level = \"debug\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.source, Some(path));
        assert_eq!(loaded.config.output.log_level, "debug");
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_config(Some(&missing)).is_err());
    }
}
