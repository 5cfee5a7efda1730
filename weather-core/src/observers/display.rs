use anyhow::Context;

use crate::{
    console::Console,
    model::{Reading, whole},
    observer::Observer,
};

/// Prints every reading it receives.
#[derive(Debug, Clone)]
pub struct WeatherDisplay {
    name: String,
    console: Console,
}

impl WeatherDisplay {
    pub const DEFAULT_NAME: &'static str = "WeatherDisplay";

    pub fn new(console: Console) -> Self {
        Self { name: Self::DEFAULT_NAME.to_string(), console }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn render(&self, reading: &Reading) -> String {
        format!(
            "{}: Showing Temperature = {}°C, Humidity = {}%, Wind Speed = {} km/h",
            self.name,
            whole(reading.temperature),
            whole(reading.humidity),
            whole(reading.wind_speed),
        )
    }
}

impl Observer for WeatherDisplay {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, reading: &Reading) -> anyhow::Result<()> {
        self.console
            .emit(&self.render(reading))
            .with_context(|| format!("{} failed to write reading", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, humidity: f64, wind_speed: f64) -> Reading {
        Reading { temperature, humidity, wind_speed }
    }

    #[test]
    fn shows_whole_numbers() {
        let console = Console::capture();
        let mut display = WeatherDisplay::new(console.clone());

        display.update(&reading(25.5, 65.3, 12.8)).unwrap();

        let lines = console.lines();
        assert_eq!(
            lines,
            vec!["WeatherDisplay: Showing Temperature = 25°C, Humidity = 65%, Wind Speed = 12 km/h"]
        );
        assert!(!lines[0].contains("25.5"));
        assert!(!lines[0].contains("65.3"));
    }

    #[test]
    fn custom_name_prefixes_output() {
        let display = WeatherDisplay::new(Console::capture()).with_name("Lobby");

        assert_eq!(display.name(), "Lobby");
        assert!(display.render(&reading(-4.2, 30.0, 0.0)).starts_with("Lobby: Showing Temperature = -4°C"));
    }
}
