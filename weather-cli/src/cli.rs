use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, CustomUserError, validator::Validation};
use rand::{SeedableRng, rngs::StdRng};
use weather_core::{
    Config, Console,
    validate::{validate_humidity, validate_temperature},
};

use crate::simulation::Simulation;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather station observer simulation")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the week-by-week station simulation.
    Simulate {
        /// Number of weeks; overrides the config file.
        #[arg(long)]
        weeks: Option<u32>,

        /// Seed for generated readings, for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between weeks in milliseconds.
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Interactively set alert thresholds and simulation length.
    Configure,

    /// Print the effective configuration as TOML.
    ShowConfig,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = self.config.as_deref();

        match self.command {
            Command::Simulate { weeks, seed, delay_ms } => {
                let mut config = Config::load(path)?;
                apply_overrides(&mut config, weeks, seed, delay_ms);

                let rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };

                let mut simulation = Simulation::new(config, Console::stdout(), rng)?;
                simulation.run().await?;

                tracing::info!(reading = ?simulation.station().get_measurements(), "final reading");
            }
            Command::Configure => {
                let config = prompt_config(Config::load(path)?)?;

                let save = Confirm::new("Save configuration?").with_default(true).prompt()?;
                if save {
                    let written = config.save(path)?;
                    println!("Configuration saved to {}", written.display());
                } else {
                    println!("Configuration not saved.");
                }
            }
            Command::ShowConfig => {
                let config = Config::load(path)?;
                print!("{}", config.to_toml()?);
            }
        }

        Ok(())
    }
}

/// Layer command-line flags over the loaded config.
fn apply_overrides(config: &mut Config, weeks: Option<u32>, seed: Option<u64>, delay_ms: Option<u64>) {
    if let Some(weeks) = weeks {
        config.set_weeks(weeks);
    }
    config.seed = seed.or(config.seed);
    if let Some(delay_ms) = delay_ms {
        config.delay_ms = delay_ms;
    }
}

fn prompt_config(mut config: Config) -> anyhow::Result<Config> {
    config.temperature_threshold = CustomType::<f64>::new("Temperature alert threshold (°C):")
        .with_default(config.temperature_threshold)
        .with_error_message("Please type a number")
        .with_validator(|value: &f64| -> Result<Validation, CustomUserError> {
            Ok(match validate_temperature(*value) {
                Ok(()) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()?;

    config.humidity_threshold = CustomType::<f64>::new("Humidity alert threshold (%):")
        .with_default(config.humidity_threshold)
        .with_error_message("Please type a number")
        .with_validator(|value: &f64| -> Result<Validation, CustomUserError> {
            Ok(match validate_humidity(*value) {
                Ok(()) => Validation::Valid,
                Err(err) => Validation::Invalid(err.to_string().into()),
            })
        })
        .prompt()?;

    let weeks = CustomType::<u32>::new("Weeks to simulate:")
        .with_default(config.weeks)
        .with_error_message("Please type a whole number")
        .with_validator(|weeks: &u32| -> Result<Validation, CustomUserError> {
            Ok(if *weeks == 0 {
                Validation::Invalid("At least one week is required".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()?;
    config.set_weeks(weeks);

    config.validate().context("Configuration is invalid")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_run_keeps_default_schedule_valid() {
        let mut config = Config::default();

        apply_overrides(&mut config, Some(5), None, None);

        assert_eq!(config.weeks, 5);
        assert!(config.validate().is_ok());

        let simulation = Simulation::new(config, Console::capture(), StdRng::seed_from_u64(3));
        assert!(simulation.is_ok());
    }

    #[test]
    fn flags_override_config_values() {
        let mut config = Config { seed: Some(1), ..Config::default() };

        apply_overrides(&mut config, None, Some(9), Some(0));

        assert_eq!(config.weeks, Config::default().weeks);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.delay_ms, 0);
    }

    #[test]
    fn missing_flags_leave_config_alone() {
        let mut config = Config { seed: Some(1), ..Config::default() };

        apply_overrides(&mut config, None, None, None);

        assert_eq!(config, Config { seed: Some(1), ..Config::default() });
    }
}
