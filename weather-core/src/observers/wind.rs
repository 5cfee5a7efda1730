use anyhow::Context;

use crate::{
    console::Console,
    model::{Reading, whole},
    observer::Observer,
};

/// Outcome of comparing a wind speed with the previously seen one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindTrend {
    /// Nothing to compare against yet.
    First,
    Rising { from: f64, to: f64 },
    /// Equal or falling.
    Steady,
}

/// Trend alert: fires when the wind speed goes up between two notifications.
#[derive(Debug, Clone)]
pub struct WindSpeedAlert {
    name: String,
    previous: Option<f64>,
    console: Console,
}

impl WindSpeedAlert {
    pub const DEFAULT_NAME: &'static str = "WindSpeedAlert";

    pub fn new(console: Console) -> Self {
        Self { name: Self::DEFAULT_NAME.to_string(), previous: None, console }
    }

    /// Start from a known previous speed so the very first notification can alert.
    pub fn with_previous(mut self, speed: f64) -> Self {
        self.previous = Some(speed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    /// Classify `wind_speed` against the stored speed, then remember it.
    pub fn observe(&mut self, wind_speed: f64) -> WindTrend {
        let trend = match self.previous {
            None => WindTrend::First,
            Some(from) if wind_speed > from => WindTrend::Rising { from, to: wind_speed },
            Some(_) => WindTrend::Steady,
        };
        self.previous = Some(wind_speed);
        trend
    }

    fn render(&self, trend: WindTrend) -> Option<String> {
        match trend {
            WindTrend::First => None,
            WindTrend::Rising { from, to } => Some(format!(
                "{}: **Alert! Wind speed is increasing: {} km/h → {} km/h**",
                self.name,
                whole(from),
                whole(to),
            )),
            WindTrend::Steady => Some(format!("{}: No alert (No upward trend detected)", self.name)),
        }
    }
}

impl Observer for WindSpeedAlert {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, reading: &Reading) -> anyhow::Result<()> {
        let trend = self.observe(reading.wind_speed);
        tracing::trace!(observer = %self.name, ?trend, "wind trend");

        let Some(line) = self.render(trend) else {
            return Ok(());
        };
        self.console
            .emit(&line)
            .with_context(|| format!("{} failed to write trend", self.name))
    }
}
