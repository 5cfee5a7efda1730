//! Range checks for the three measured quantities.
//!
//! Checks run in the order temperature, humidity, wind speed and stop at the
//! first violation, so a reading with several bad fields always reports the
//! earliest one. Non-finite values (NaN, infinities) are never accepted.

use std::fmt;

pub const TEMPERATURE_RANGE: AllowedRange = AllowedRange::between(-100.0, 100.0);
pub const HUMIDITY_RANGE: AllowedRange = AllowedRange::between(0.0, 100.0);
pub const WIND_SPEED_RANGE: AllowedRange = AllowedRange::at_least(0.0);

/// Which measurement a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::WindSpeed => "wind_speed",
        }
    }

    pub fn range(&self) -> AllowedRange {
        match self {
            Field::Temperature => TEMPERATURE_RANGE,
            Field::Humidity => HUMIDITY_RANGE,
            Field::WindSpeed => WIND_SPEED_RANGE,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed lower bound with an optional closed upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllowedRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl AllowedRange {
    pub const fn between(min: f64, max: f64) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && self.max.is_none_or(|max| value <= max)
    }
}

impl fmt::Display for AllowedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}, {}]", self.min, max),
            None => write!(f, "[{}, ∞)", self.min),
        }
    }
}

/// A measurement (or a threshold derived from one) fell outside its legal range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be within {range}, got {value}")]
pub struct ValidationError {
    pub field: Field,
    pub value: f64,
    pub range: AllowedRange,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn check(field: Field, value: f64) -> ValidationResult<()> {
    let range = field.range();
    if range.contains(value) {
        Ok(())
    } else {
        Err(ValidationError { field, value, range })
    }
}

pub fn validate_temperature(value: f64) -> ValidationResult<()> {
    check(Field::Temperature, value)
}

pub fn validate_humidity(value: f64) -> ValidationResult<()> {
    check(Field::Humidity, value)
}

pub fn validate_wind_speed(value: f64) -> ValidationResult<()> {
    check(Field::WindSpeed, value)
}

/// Validate a full set of measurements, reporting the first violation.
pub fn validate_measurements(temperature: f64, humidity: f64, wind_speed: f64) -> ValidationResult<()> {
    validate_temperature(temperature)?;
    validate_humidity(humidity)?;
    validate_wind_speed(wind_speed)
}
