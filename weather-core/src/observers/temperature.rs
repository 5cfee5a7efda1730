use anyhow::Context;

use crate::{
    console::Console,
    model::{Reading, whole},
    observer::Observer,
};

/// Alerts when the temperature is strictly above the threshold.
#[derive(Debug, Clone)]
pub struct TemperatureAlert {
    name: String,
    threshold: f64,
    console: Console,
}

impl TemperatureAlert {
    pub const DEFAULT_NAME: &'static str = "TemperatureAlert";

    /// Threshold is taken as-is; use the factory for a range-checked one.
    pub fn new(threshold: f64, console: Console) -> Self {
        Self { name: Self::DEFAULT_NAME.to_string(), threshold, console }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The alert line for `reading`, or `None` when it stays at or below the threshold.
    pub fn evaluate(&self, reading: &Reading) -> Option<String> {
        (reading.temperature > self.threshold).then(|| {
            format!(
                "{}: **Alert! Temperature exceeded {}°C: {}°C**",
                self.name,
                whole(self.threshold),
                whole(reading.temperature),
            )
        })
    }
}

impl Observer for TemperatureAlert {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, reading: &Reading) -> anyhow::Result<()> {
        let Some(alert) = self.evaluate(reading) else {
            return Ok(());
        };

        tracing::debug!(observer = %self.name, threshold = self.threshold, value = reading.temperature, "temperature alert");
        self.console
            .emit(&alert)
            .with_context(|| format!("{} failed to write alert", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(temperature: f64) -> Reading {
        Reading { temperature, humidity: 50.0, wind_speed: 10.0 }
    }

    #[test]
    fn fires_strictly_above_threshold() {
        let alert = TemperatureAlert::new(30.0, Console::capture());

        assert!(alert.evaluate(&at(30.1)).is_some());
        assert!(alert.evaluate(&at(30.0)).is_none());
        assert!(alert.evaluate(&at(29.0)).is_none());
    }

    #[test]
    fn alert_cites_threshold_and_value() {
        let console = Console::capture();
        let mut alert = TemperatureAlert::new(30.0, console.clone());

        alert.update(&at(29.0)).unwrap();
        alert.update(&at(31.0)).unwrap();

        assert_eq!(console.lines(), vec!["TemperatureAlert: **Alert! Temperature exceeded 30°C: 31°C**"]);
    }

    #[test]
    fn no_output_at_threshold() {
        let console = Console::capture();
        let mut alert = TemperatureAlert::new(30.0, console.clone());

        alert.update(&at(30.0)).unwrap();

        assert!(console.lines().is_empty());
    }
}
