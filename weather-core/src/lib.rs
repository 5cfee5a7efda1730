//! Core library for the weather station simulation.
//!
//! This crate defines:
//! - Measurement validation and the [`Reading`] model
//! - The [`Observer`] contract and the bundled observers (display and alerts)
//! - The [`WeatherStation`] subject that validates, stores and broadcasts readings
//! - An [`ObserverFactory`] for preconfigured observers
//! - Simulation configuration on disk
//!
//! It is used by `weather-cli`, but has no dependency on it.

pub mod config;
pub mod console;
pub mod factory;
pub mod model;
pub mod observer;
pub mod observers;
pub mod station;
pub mod validate;

pub use config::{Config, ScheduleAction, ScheduleEvent};
pub use console::Console;
pub use factory::{ObserverFactory, ObserverKind};
pub use model::Reading;
pub use observer::{Observer, SharedObserver, shared};
pub use observers::{HumidityAlert, TemperatureAlert, WeatherDisplay, WindSpeedAlert, WindTrend};
pub use station::{NotifyReport, ObserverFailure, WeatherStation};
pub use validate::{AllowedRange, Field, ValidationError, validate_measurements};
