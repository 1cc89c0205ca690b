use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, LookupError,
    model::{Coordinates, CurrentConditions, Forecast},
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// The two calls a dashboard refresh needs.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, LookupError>;

    async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast, LookupError>;
}

/// Build the OpenWeather client from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.require_api_key()?;
    OpenWeatherClient::new(api_key.to_owned(), &config.base_url, config.timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let err = source_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn source_from_config_works_when_key_is_set() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            ..Config::default()
        };
        assert!(source_from_config(&cfg).is_ok());
    }
}
