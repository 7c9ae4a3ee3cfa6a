//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the `WeatherProvider` seam
//! - The query coordinator (current conditions, then the daily forecast)
//! - Display mapping from weather data to panel text
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod coordinator;
pub mod display;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use config::Config;
pub use coordinator::{ForecastTask, QueryCoordinator, QueryState, Session};
pub use error::WeatherError;
pub use model::{CurrentConditions, ForecastSample, ForecastSeries};
pub use provider::{OpenWeatherProvider, WeatherProvider, provider_from_config};
