use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, validate_measurements};

/// A single set of weather measurements held by the station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Kilometres per hour.
    pub wind_speed: f64,
}

impl Reading {
    /// Build a reading, rejecting values outside the legal ranges.
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Result<Self, ValidationError> {
        validate_measurements(temperature, humidity, wind_speed)?;

        Ok(Self { temperature, humidity, wind_speed })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_measurements(self.temperature, self.humidity, self.wind_speed)
    }
}

/// Render a measurement the way observers print it: whole units, truncated toward zero.
pub(crate) fn whole(value: f64) -> i64 {
    value.trunc() as i64
}
