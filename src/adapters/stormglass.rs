use crate::domain::model::GeoCoordinate;
use crate::domain::ports::MarineProvider;
use crate::domain::weather::RawMarine;
use crate::utils::error::{MaritimeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.stormglass.io/v2";

const MARINE_PARAMS: &str = "waveHeight,waveDirection,wavePeriod,windSpeed,windDirection";

/// Stormglass point forecast. The API key goes in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct StormglassClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StormglassClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl MarineProvider for StormglassClient {
    fn name(&self) -> &'static str {
        "stormglass"
    }

    async fn fetch_marine(&self, at: GeoCoordinate) -> Result<RawMarine> {
        let url = format!("{}/weather/point", self.base_url);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("lat", at.lat().to_string()),
                ("lng", at.lon().to_string()),
                ("params", MARINE_PARAMS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Stormglass returned {}", status);
            return Err(MaritimeError::WeatherUnavailable {
                message: format!("Stormglass returned {}", status),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
