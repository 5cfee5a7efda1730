use anyhow::Context;

use crate::{
    console::Console,
    model::{Reading, whole},
    observer::Observer,
};

/// Alerts when humidity reaches the threshold. Unlike [`TemperatureAlert`]
/// the comparison is inclusive.
///
/// [`TemperatureAlert`]: super::TemperatureAlert
#[derive(Debug, Clone)]
pub struct HumidityAlert {
    name: String,
    threshold: f64,
    console: Console,
}

impl HumidityAlert {
    pub const DEFAULT_NAME: &'static str = "HumidityAlert";

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

    pub fn evaluate(&self, reading: &Reading) -> Option<String> {
        (reading.humidity >= self.threshold).then(|| {
            format!(
                "{}: **Alert! Humidity exceeded {}%: {}%**",
                self.name,
                whole(self.threshold),
                whole(reading.humidity),
            )
        })
    }
}

impl Observer for HumidityAlert {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, reading: &Reading) -> anyhow::Result<()> {
        match self.evaluate(reading) {
            Some(alert) => self
                .console
                .emit(&alert)
                .with_context(|| format!("{} failed to write alert", self.name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(humidity: f64) -> Reading {
        Reading { temperature: 25.0, humidity, wind_speed: 10.0 }
    }

    #[test]
    fn fires_at_and_above_threshold() {
        let alert = HumidityAlert::new(70.0, Console::capture());

        assert!(alert.evaluate(&at(70.0)).is_some());
        assert!(alert.evaluate(&at(70.1)).is_some());
        assert!(alert.evaluate(&at(69.9)).is_none());
    }

    #[test]
    fn threshold_trigger() {
        let console = Console::capture();
        let mut alert = HumidityAlert::new(75.0, console.clone());

        alert.update(&at(74.0)).unwrap();
        alert.update(&at(76.0)).unwrap();

        let lines = console.lines();
        assert_eq!(lines, vec!["HumidityAlert: **Alert! Humidity exceeded 75%: 76%**"]);
        assert!(!lines[0].contains("74%"));
    }

    #[test]
    fn equality_triggers_alert() {
        let console = Console::capture();
        let mut alert = HumidityAlert::new(85.0, console.clone());

        alert.update(&at(85.0)).unwrap();

        assert_eq!(console.lines(), vec!["HumidityAlert: **Alert! Humidity exceeded 85%: 85%**"]);
    }
}
