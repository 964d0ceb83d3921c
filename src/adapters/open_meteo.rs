use crate::domain::model::GeoCoordinate;
use crate::domain::ports::WeatherProvider;
use crate::domain::weather::RawForecast;
use crate::utils::error::{MaritimeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,precipitation,weather_code";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Open-Meteo forecast API. Needs no key.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    fn name(&self) -> &'static str {
        "open-meteo"
    }

    async fn fetch_forecast(&self, at: GeoCoordinate) -> Result<RawForecast> {
        let url = format!("{}/forecast", self.base_url);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", at.lat().to_string()),
                ("longitude", at.lon().to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Open-Meteo returned {}: {}", status, body);
            return Err(MaritimeError::WeatherUnavailable {
                message: format!("Open-Meteo returned {}", status),
            });
        }

        let body = response.text().await?;
        let forecast: RawForecast = serde_json::from_str(&body)?;
        Ok(forecast)
    }
}
