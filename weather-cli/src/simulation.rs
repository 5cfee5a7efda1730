//! Week-by-week driver feeding readings into a station.
//!
//! One observer per kind is built up front and reused, so an observer that
//! is removed and later registered again keeps its own state.

use std::{collections::HashMap, time::Duration};

use anyhow::{Context, Result};
use rand::Rng;
use weather_core::{
    Config, Console, ObserverFactory, ObserverKind, Reading, ScheduleAction, SharedObserver,
    WeatherStation,
};

const TEMPERATURE_SPAN: (i32, i32) = (20, 45);
const HUMIDITY_SPAN: (i32, i32) = (40, 95);
const WIND_SPEED_SPAN: (i32, i32) = (10, 35);

/// Whole-number reading drawn from the simulation spans.
pub fn random_reading<R: Rng>(rng: &mut R) -> Reading {
    let mut draw = |(lo, hi): (i32, i32)| f64::from(rng.gen_range(lo..=hi));

    Reading {
        temperature: draw(TEMPERATURE_SPAN),
        humidity: draw(HUMIDITY_SPAN),
        wind_speed: draw(WIND_SPEED_SPAN),
    }
}

pub struct Simulation<R> {
    config: Config,
    console: Console,
    station: WeatherStation,
    observers: HashMap<ObserverKind, SharedObserver>,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    pub fn new(config: Config, console: Console, rng: R) -> Result<Self> {
        config.validate()?;

        let factory = ObserverFactory::new(console.clone());
        let mut observers = HashMap::new();
        for kind in ObserverKind::all() {
            let observer = factory
                .create_with(*kind, config.temperature_threshold, config.humidity_threshold)
                .with_context(|| format!("Failed to build observer '{kind}'"))?;
            observers.insert(*kind, observer);
        }

        Ok(Self { config, console, station: WeatherStation::new(), observers, rng })
    }

    pub fn station(&self) -> &WeatherStation {
        &self.station
    }

    #[cfg(test)]
    pub fn observer(&self, kind: ObserverKind) -> Option<&SharedObserver> {
        self.observers.get(&kind)
    }

    /// Play every configured week, pausing `delay_ms` between them.
    pub async fn run(&mut self) -> Result<()> {
        let delay = Duration::from_millis(self.config.delay_ms);

        for week in 1..=self.config.weeks {
            self.run_week(week)?;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        tracing::info!(weeks = self.config.weeks, "simulation finished");
        Ok(())
    }

    /// Apply registrations, publish the week's reading, then apply removals.
    pub fn run_week(&mut self, week: u32) -> Result<Reading> {
        self.say(&format!("Week {week}:"))?;
        self.apply(week, ScheduleAction::Register)?;

        let reading = match self.config.scripted_reading(week) {
            Some(reading) => reading,
            None => random_reading(&mut self.rng),
        };

        let report = self
            .station
            .set_measurements(reading.temperature, reading.humidity, reading.wind_speed)
            .with_context(|| format!("Week {week} produced an invalid reading"))?;
        tracing::debug!(week, delivered = report.delivered, failed = report.failures.len(), "week published");

        self.apply(week, ScheduleAction::Unregister)?;
        self.say("---")?;

        Ok(reading)
    }

    fn apply(&self, week: u32, action: ScheduleAction) -> Result<()> {
        for event in self.config.events(week, action) {
            let Some(observer) = self.observers.get(&event.observer) else {
                continue;
            };
            let name = observer.borrow().name().to_string();

            match action {
                ScheduleAction::Register => {
                    self.say(&format!("Adding: {name}"))?;
                    self.station.register_observer(observer.clone());
                }
                ScheduleAction::Unregister => {
                    self.say(&format!("Removing: {name}"))?;
                    self.station.unregister_observer(observer);
                }
            }
        }

        Ok(())
    }

    fn say(&self, line: &str) -> Result<()> {
        self.console.emit(line).context("Failed to write simulation output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn simulation(config: Config, console: &Console) -> Simulation<StdRng> {
        Simulation::new(config, console.clone(), StdRng::seed_from_u64(7)).expect("valid config")
    }

    #[test]
    fn first_week_uses_scripted_reading() {
        let console = Console::capture();
        let mut sim = simulation(Config::default(), &console);

        let reading = sim.run_week(1).unwrap();

        assert_eq!(reading, Reading { temperature: 28.0, humidity: 70.0, wind_speed: 12.0 });
        assert_eq!(
            console.lines(),
            vec![
                "Week 1:",
                "Adding: WeatherDisplay",
                "WeatherDisplay: Showing Temperature = 28°C, Humidity = 70%, Wind Speed = 12 km/h",
                "---",
            ]
        );
    }

    #[test]
    fn default_schedule_adds_then_removes_humidity_alert() {
        let console = Console::capture();
        let mut sim = simulation(Config::default(), &console);

        for week in 1..=6 {
            sim.run_week(week).unwrap();
        }
        assert_eq!(sim.station().observer_count(), 4);

        sim.run_week(7).unwrap();
        console.take();
        sim.run_week(8).unwrap();

        let lines = console.lines();
        assert_eq!(lines.last().map(String::as_str), Some("---"));
        assert!(lines.contains(&"Removing: HumidityAlert".to_string()));
        assert_eq!(sim.station().observer_count(), 3);

        let humidity = sim.observer(ObserverKind::HumidityAlert).unwrap();
        assert!(!sim.station().is_registered(humidity));
    }

    #[test]
    fn generated_readings_stay_in_spans() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let reading = random_reading(&mut rng);
            assert!((20.0..=45.0).contains(&reading.temperature));
            assert!((40.0..=95.0).contains(&reading.humidity));
            assert!((10.0..=35.0).contains(&reading.wind_speed));
            assert_eq!(reading.temperature.fract(), 0.0);
        }
    }

    #[test]
    fn same_seed_same_transcript() {
        let config = Config { weeks: 10, delay_ms: 0, ..Config::default() };
        let first = Console::capture();
        let second = Console::capture();

        let mut a = simulation(config.clone(), &first);
        let mut b = simulation(config, &second);
        for week in 1..=10 {
            a.run_week(week).unwrap();
            b.run_week(week).unwrap();
        }

        assert_eq!(first.lines(), second.lines());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config { humidity_threshold: 120.0, ..Config::default() };
        let result = Simulation::new(config, Console::capture(), StdRng::seed_from_u64(1));

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_plays_every_week() {
        let console = Console::capture();
        let config = Config { weeks: 5, delay_ms: 0, schedule: Vec::new(), ..Config::default() };
        let mut sim = simulation(config, &console);

        sim.run().await.unwrap();

        let lines = console.lines();
        assert_eq!(lines.iter().filter(|l| *l == "---").count(), 5);
        assert_eq!(lines.first().map(String::as_str), Some("Week 1:"));
        assert_eq!(sim.station().observer_count(), 0);
    }
}
