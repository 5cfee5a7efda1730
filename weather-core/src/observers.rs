//! Concrete observers shipped with the station.
//!
//! Each observer owns its own configuration and state and writes through the
//! [`Console`](crate::Console) it was built with.

pub mod display;
pub mod humidity;
pub mod temperature;
pub mod wind;

pub use display::WeatherDisplay;
pub use humidity::HumidityAlert;
pub use temperature::TemperatureAlert;
pub use wind::{WindSpeedAlert, WindTrend};
