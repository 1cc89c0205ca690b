use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    LookupError,
    model::{Condition, Coordinates, CurrentConditions, Forecast, ForecastSample},
};

use super::WeatherSource;

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|source| LookupError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| LookupError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|source| LookupError::Parse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    icon: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    coord: OwCoord,
    name: String,
    dt: i64,
    #[serde(default)]
    timezone: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    pop: Option<f64>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Option<Condition> {
    weather.into_iter().next().map(|w| Condition {
        category: w.main,
        icon: w.icon,
        description: w.description,
    })
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        Self {
            location_name: parsed.name,
            coordinates: Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            },
            timestamp: parsed.dt,
            utc_offset: parsed.timezone,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition: first_condition(parsed.weather),
        }
    }
}

impl From<OwForecastResponse> for Forecast {
    fn from(parsed: OwForecastResponse) -> Self {
        let samples = parsed
            .list
            .into_iter()
            .map(|e| ForecastSample {
                timestamp: e.dt,
                temperature_c: e.main.temp,
                pop: e.pop.unwrap_or(0.0),
                condition: first_condition(e.weather),
            })
            .collect();

        Self { samples }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, LookupError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_ENDPOINT, &[("q", city)]).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Forecast, LookupError> {
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();

        let query = [("lat", lat.as_str()), ("lon", lon.as_str())];

        let parsed: OwForecastResponse = self.get_json(FORECAST_ENDPOINT, &query).await?;
        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_payload_maps_to_domain() {
        let json = serde_json::json!({
            "coord": { "lon": 126.9778, "lat": 37.5683 },
            "weather": [
                { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01n" }
            ],
            "main": {
                "temp": 14.2,
                "feels_like": 13.1,
                "pressure": 1019,
                "humidity": 58
            },
            "wind": { "speed": 3.6, "deg": 270 },
            "dt": 1714521600,
            "timezone": 32400,
            "name": "Seoul",
            "cod": 200
        });

        let parsed: OwCurrentResponse = serde_json::from_value(json).expect("valid payload");
        let current = CurrentConditions::from(parsed);

        assert_eq!(current.location_name, "Seoul");
        assert_eq!(
            current.coordinates,
            Coordinates {
                lat: 37.5683,
                lon: 126.9778
            }
        );
        assert_eq!(current.utc_offset, 32_400);
        assert_eq!(current.humidity_pct, 58);
        assert_eq!(
            current.condition.as_ref().map(|c| c.icon.as_str()),
            Some("01n")
        );
    }

    #[test]
    fn forecast_entry_without_pop_or_weather_still_parses() {
        let json = serde_json::json!({
            "cod": "200",
            "list": [
                {
                    "dt": 1714521600,
                    "main": { "temp": 10.0, "feels_like": 9.0, "humidity": 70 },
                    "weather": []
                },
                {
                    "dt": 1714532400,
                    "main": { "temp": 11.5, "feels_like": 10.0, "humidity": 65 },
                    "pop": 0.4,
                    "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }]
                }
            ]
        });

        let parsed: OwForecastResponse = serde_json::from_value(json).expect("valid payload");
        let forecast = Forecast::from(parsed);

        assert_eq!(forecast.samples.len(), 2);
        assert_eq!(forecast.samples[0].pop, 0.0);
        assert!(forecast.samples[0].condition.is_none());
        assert_eq!(forecast.samples[1].pop, 0.4);
        assert_eq!(
            forecast.samples[1]
                .condition
                .as_ref()
                .map(|c| c.category.as_str()),
            Some("Rain")
        );
    }

    #[test]
    fn current_payload_without_coord_is_rejected() {
        let json = serde_json::json!({ "cod": "404", "message": "city not found" });
        assert!(serde_json::from_value::<OwCurrentResponse>(json).is_err());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
