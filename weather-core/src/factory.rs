use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    console::Console,
    observer::{SharedObserver, shared},
    observers::{HumidityAlert, TemperatureAlert, WeatherDisplay, WindSpeedAlert},
    validate::{ValidationResult, validate_humidity, validate_temperature},
};

pub const DEFAULT_TEMPERATURE_THRESHOLD: f64 = 32.0;
pub const DEFAULT_HUMIDITY_THRESHOLD: f64 = 85.0;

/// The observer variants the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverKind {
    Display,
    TemperatureAlert,
    HumidityAlert,
    WindSpeedAlert,
}

impl ObserverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverKind::Display => "display",
            ObserverKind::TemperatureAlert => "temperature_alert",
            ObserverKind::HumidityAlert => "humidity_alert",
            ObserverKind::WindSpeedAlert => "wind_speed_alert",
        }
    }

    pub const fn all() -> &'static [ObserverKind] {
        &[
            ObserverKind::Display,
            ObserverKind::TemperatureAlert,
            ObserverKind::HumidityAlert,
            ObserverKind::WindSpeedAlert,
        ]
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ObserverKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "display" => Ok(ObserverKind::Display),
            "temperature_alert" => Ok(ObserverKind::TemperatureAlert),
            "humidity_alert" => Ok(ObserverKind::HumidityAlert),
            "wind_speed_alert" => Ok(ObserverKind::WindSpeedAlert),
            _ => Err(anyhow::anyhow!(
                "Unknown observer '{value}'. Supported observers: display, temperature_alert, humidity_alert, wind_speed_alert."
            )),
        }
    }
}

/// Builds observers that all report to one console.
///
/// Thresholds passed in are range-checked against the same limits the
/// station applies to readings; `None` selects the documented default.
#[derive(Debug, Clone, Default)]
pub struct ObserverFactory {
    console: Console,
}

impl ObserverFactory {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn display(&self) -> SharedObserver {
        shared(WeatherDisplay::new(self.console.clone()))
    }

    /// Defaults to [`DEFAULT_TEMPERATURE_THRESHOLD`].
    pub fn temperature_alert(&self, threshold: Option<f64>) -> ValidationResult<SharedObserver> {
        let threshold = threshold.unwrap_or(DEFAULT_TEMPERATURE_THRESHOLD);
        validate_temperature(threshold)?;

        Ok(shared(TemperatureAlert::new(threshold, self.console.clone())))
    }

    /// Defaults to [`DEFAULT_HUMIDITY_THRESHOLD`].
    pub fn humidity_alert(&self, threshold: Option<f64>) -> ValidationResult<SharedObserver> {
        let threshold = threshold.unwrap_or(DEFAULT_HUMIDITY_THRESHOLD);
        validate_humidity(threshold)?;

        Ok(shared(HumidityAlert::new(threshold, self.console.clone())))
    }

    pub fn wind_speed_alert(&self) -> SharedObserver {
        shared(WindSpeedAlert::new(self.console.clone()))
    }

    /// Build one observer of `kind` with default configuration.
    pub fn create(&self, kind: ObserverKind) -> SharedObserver {
        match kind {
            ObserverKind::Display => self.display(),
            ObserverKind::TemperatureAlert => {
                shared(TemperatureAlert::new(DEFAULT_TEMPERATURE_THRESHOLD, self.console.clone()))
            }
            ObserverKind::HumidityAlert => {
                shared(HumidityAlert::new(DEFAULT_HUMIDITY_THRESHOLD, self.console.clone()))
            }
            ObserverKind::WindSpeedAlert => self.wind_speed_alert(),
        }
    }

    /// Build one observer of `kind`, using the given thresholds for the alerts that take one.
    pub fn create_with(
        &self,
        kind: ObserverKind,
        temperature_threshold: f64,
        humidity_threshold: f64,
    ) -> ValidationResult<SharedObserver> {
        Ok(match kind {
            ObserverKind::Display => self.display(),
            ObserverKind::TemperatureAlert => self.temperature_alert(Some(temperature_threshold))?,
            ObserverKind::HumidityAlert => self.humidity_alert(Some(humidity_threshold))?,
            ObserverKind::WindSpeedAlert => self.wind_speed_alert(),
        })
    }

    /// Temperature, wind speed and humidity alerts, in that order.
    pub fn all_alerts(
        &self,
        temperature_threshold: f64,
        humidity_threshold: f64,
    ) -> ValidationResult<Vec<SharedObserver>> {
        Ok(vec![
            self.temperature_alert(Some(temperature_threshold))?,
            self.wind_speed_alert(),
            self.humidity_alert(Some(humidity_threshold))?,
        ])
    }

    /// Display, temperature alert, humidity alert and wind speed alert with default thresholds.
    pub fn default_observers(&self) -> Vec<SharedObserver> {
        ObserverKind::all().iter().map(|kind| self.create(*kind)).collect()
    }
}
