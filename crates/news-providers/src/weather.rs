//! OpenWeatherMap current-weather adapter and client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

use crate::error::{ProviderError, Result};
use crate::http::{build_client, endpoint, get_body, mask_token};

const PROVIDER: &str = "weather";

pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Current conditions for one city, metric units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    weather: Vec<Condition>,
    main: MainBlock,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// Maps an OpenWeatherMap body to a report. `requested_city` is used when the body has no `name`.
pub fn parse_weather(body: &str, requested_city: &str) -> Result<WeatherReport> {
    let response: WeatherResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

    let description = response
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| ProviderError::malformed(PROVIDER, "weather[0] missing"))?;

    let city = match response.name {
        Some(name) if !name.is_empty() => name,
        _ => requested_city.to_string(),
    };

    Ok(WeatherReport {
        city,
        description,
        temp: response.main.temp,
        temp_min: response.main.temp_min,
        temp_max: response.main.temp_max,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
    })
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherReport>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, OPENWEATHER_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self), fields(api_key = %mask_token(&self.api_key)))]
    async fn current(&self, city: &str) -> Result<WeatherReport> {
        let mut url = endpoint(PROVIDER, &self.base_url, "data/2.5/weather")?;
        url.query_pairs_mut()
            .append_pair("q", city)
            .append_pair("units", "metric")
            .append_pair("appid", &self.api_key);

        let body = get_body(&self.client, PROVIDER, url).await?;
        let report = parse_weather(&body, city)?;
        info!(city = %report.city, temp = report.temp, "step: weather fetched");
        Ok(report)
    }
}
