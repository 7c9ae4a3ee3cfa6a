use crate::{Config, CurrentConditions, ForecastSample, WeatherError};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Remote source of weather data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Full 3-hour forecast series for `city`, unfiltered.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// The API key is resolved here, once, so nothing downstream ever reads it
/// from the environment or the file again.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.resolve_api_key()?;
    let timeout = config.timeout_secs.map(Duration::from_secs);

    OpenWeatherProvider::builder(api_key)
        .base_url(config.base_url())
        .timeout(timeout)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".to_string()),
            base_url: Some("http://localhost:9999/data/2.5/".to_string()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("provider should build");
        assert_eq!(provider.base_url(), "http://localhost:9999/data/2.5");
    }
}
