use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    factory::{DEFAULT_HUMIDITY_THRESHOLD, DEFAULT_TEMPERATURE_THRESHOLD, ObserverKind},
    model::Reading,
    validate::{validate_humidity, validate_temperature},
};

/// Whether a schedule entry attaches or detaches an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleAction {
    Register,
    Unregister,
}

/// One change to the registry during a simulation. Registrations happen
/// before the week's reading is published, removals after it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub week: u32,
    pub action: ScheduleAction,
    pub observer: ObserverKind,
}

impl ScheduleEvent {
    pub fn register(week: u32, observer: ObserverKind) -> Self {
        Self { week, action: ScheduleAction::Register, observer }
    }

    pub fn unregister(week: u32, observer: ObserverKind) -> Self {
        Self { week, action: ScheduleAction::Unregister, observer }
    }
}

/// Simulation configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// weeks = 20
/// temperature_threshold = 32.0
///
/// [[readings]]
/// temperature = 28.0
/// humidity = 70.0
/// wind_speed = 12.0
///
/// [[schedule]]
/// week = 4
/// action = "register"
/// observer = "temperature_alert"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weeks: u32,

    /// Pause between weeks, in milliseconds.
    pub delay_ms: u64,

    /// Seed for generated readings; unset means a fresh seed per run.
    pub seed: Option<u64>,

    pub temperature_threshold: f64,
    pub humidity_threshold: f64,

    /// Readings for the first weeks, in order. Later weeks are generated.
    pub readings: Vec<Reading>,

    pub schedule: Vec<ScheduleEvent>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weeks: 20,
            delay_ms: 100,
            seed: None,
            temperature_threshold: DEFAULT_TEMPERATURE_THRESHOLD,
            humidity_threshold: DEFAULT_HUMIDITY_THRESHOLD,
            readings: vec![
                Reading { temperature: 28.0, humidity: 70.0, wind_speed: 12.0 },
                Reading { temperature: 30.0, humidity: 72.0, wind_speed: 15.0 },
                Reading { temperature: 32.0, humidity: 74.0, wind_speed: 18.0 },
            ],
            schedule: vec![
                ScheduleEvent::register(1, ObserverKind::Display),
                ScheduleEvent::register(4, ObserverKind::TemperatureAlert),
                ScheduleEvent::register(5, ObserverKind::WindSpeedAlert),
                ScheduleEvent::register(6, ObserverKind::HumidityAlert),
                ScheduleEvent::unregister(8, ObserverKind::HumidityAlert),
            ],
        }
    }
}

impl Config {
    /// Load from `path`, or from the platform config file when `path` is `None`.
    ///
    /// An explicit path must exist; a missing platform file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Self::config_file_path()?;
                if !default.exists() {
                    // First run: no config file, return defaults.
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Save to `path` (or the platform config file), creating parent directories as needed.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-station", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check thresholds, scripted readings and schedule weeks.
    pub fn validate(&self) -> Result<()> {
        if self.weeks == 0 {
            bail!("weeks must be at least 1");
        }

        validate_temperature(self.temperature_threshold).context("Invalid temperature_threshold")?;
        validate_humidity(self.humidity_threshold).context("Invalid humidity_threshold")?;

        for (i, reading) in self.readings.iter().enumerate() {
            reading
                .validate()
                .with_context(|| format!("Invalid scripted reading for week {}", i + 1))?;
        }

        for event in &self.schedule {
            if event.week == 0 || event.week > self.weeks {
                bail!(
                    "Schedule entry for '{}' is in week {}, outside 1..={}",
                    event.observer,
                    event.week,
                    self.weeks
                );
            }
        }

        Ok(())
    }

    /// Shorten or extend the simulation, dropping schedule entries that fall
    /// after the new last week.
    pub fn set_weeks(&mut self, weeks: u32) {
        self.weeks = weeks;
        self.schedule.retain(|event| event.week <= weeks);
    }

    /// Scripted reading for a 1-based week, if one was configured.
    pub fn scripted_reading(&self, week: u32) -> Option<Reading> {
        let index = usize::try_from(week.checked_sub(1)?).ok()?;
        self.readings.get(index).copied()
    }

    /// Schedule entries for `week` with the given action, in file order.
    pub fn events(&self, week: u32, action: ScheduleAction) -> impl Iterator<Item = &ScheduleEvent> {
        self.schedule.iter().filter(move |e| e.week == week && e.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();

        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.weeks, 20);
        assert_eq!(cfg.temperature_threshold, 32.0);
        assert_eq!(cfg.humidity_threshold, 85.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml("weeks = 10\nseed = 7\n").expect("valid config");

        assert_eq!(cfg.weeks, 10);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.readings, Config::default().readings);
        assert_eq!(cfg.schedule, Config::default().schedule);
    }

    #[test]
    fn parses_schedule_entries() {
        let toml = r#"
            weeks = 3
            readings = []

            [[schedule]]
            week = 2
            action = "unregister"
            observer = "wind_speed_alert"
        "#;

        let cfg = Config::from_toml(toml).expect("valid config");

        assert_eq!(cfg.schedule, vec![ScheduleEvent::unregister(2, ObserverKind::WindSpeedAlert)]);
        assert_eq!(cfg.events(2, ScheduleAction::Unregister).count(), 1);
        assert_eq!(cfg.events(2, ScheduleAction::Register).count(), 0);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = Config::from_toml("temperature_threshold = 120.0\n").unwrap_err();
        let msg = format!("{err:#}");

        assert!(msg.contains("Invalid temperature_threshold"));
        assert!(msg.contains("temperature must be within [-100, 100]"));
    }

    #[test]
    fn rejects_invalid_scripted_reading() {
        let toml = r#"
            [[readings]]
            temperature = 20.0
            humidity = 140.0
            wind_speed = 3.0
        "#;

        let err = Config::from_toml(toml).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid scripted reading for week 1"));
    }

    #[test]
    fn rejects_schedule_outside_simulation() {
        let cfg = Config { weeks: 5, ..Config::default() };

        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("week 6"));
    }

    #[test]
    fn set_weeks_drops_events_past_end() {
        let mut cfg = Config::default();

        cfg.set_weeks(5);

        assert_eq!(cfg.weeks, 5);
        assert!(cfg.validate().is_ok());
        assert!(cfg.schedule.iter().all(|event| event.week <= 5));
        assert_eq!(cfg.schedule.len(), 3);
    }

    #[test]
    fn scripted_reading_is_one_based() {
        let cfg = Config::default();

        assert_eq!(cfg.scripted_reading(0), None);
        assert_eq!(cfg.scripted_reading(1), Some(cfg.readings[0]));
        assert_eq!(cfg.scripted_reading(3), Some(cfg.readings[2]));
        assert_eq!(cfg.scripted_reading(4), None);
    }

    #[test]
    fn toml_roundtrip_keeps_config() {
        let cfg = Config { seed: Some(42), ..Config::default() };

        let parsed = Config::from_toml(&cfg.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn load_explicit_missing_path_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/weather/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
