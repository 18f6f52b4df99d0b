//! OpenWeatherMap 5 day / 3 hour forecast adapter.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::model::{Coordinate, ForecastSample};
use crate::traits::ForecastProvider;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: OpenWeatherConfig,
    client: reqwest::blocking::Client,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(PlannerError::Config("OpenWeatherMap API key is not set".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl ForecastProvider for OpenWeatherClient {
    fn forecast_for(&self, coordinate: Coordinate) -> Result<Vec<ForecastSample>> {
        let url = format!("{}/data/2.5/forecast", self.config.base_url.trim_end_matches('/'));
        debug!(lat = coordinate.lat, lon = coordinate.lon, "requesting forecast");

        let lat = coordinate.lat.to_string();
        let lon = coordinate.lon.to_string();
        let body = self
            .client
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<ForecastResponse>())
            .map_err(|err| PlannerError::ForecastUnavailable(err.to_string()))?;

        body.list.into_iter().map(ForecastEntry::into_sample).collect()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainReadings,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

impl ForecastEntry {
    fn into_sample(self) -> Result<ForecastSample> {
        let timestamp = DateTime::<Utc>::from_timestamp(self.dt, 0)
            .ok_or_else(|| PlannerError::ForecastUnavailable(format!("timestamp {} out of range", self.dt)))?;
        Ok(ForecastSample {
            timestamp,
            temperature_celsius: self.main.temp,
            precipitation_probability: self.pop.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_forecast_list() {
        let body: ForecastResponse = serde_json::from_str(
            r#"{
                "cod": "200",
                "list": [
                    {"dt": 1780300800, "main": {"temp": 18.4, "humidity": 60}, "pop": 0.2},
                    {"dt": 1780311600, "main": {"temp": 21.1}}
                ]
            }"#,
        )
        .unwrap();
        let samples: Vec<ForecastSample> = body
            .list
            .into_iter()
            .map(ForecastEntry::into_sample)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp.timestamp(), 1780300800);
        assert_eq!(samples[0].precipitation_probability, 0.2);
        assert_eq!(samples[1].temperature_celsius, 21.1);
        assert_eq!(samples[1].precipitation_probability, 0.0);
    }

    #[test]
    fn missing_key_is_config_error() {
        assert!(matches!(
            OpenWeatherClient::new(OpenWeatherConfig::default()),
            Err(PlannerError::Config(_))
        ));
    }
}
