use crate::domain::model::GeoCoordinate;
use crate::domain::weather::{RawForecast, RawMarine};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the port reference table comes from (local file, S3 object, ...).
pub trait PortTableSource: Send + Sync {
    fn describe(&self) -> String;
    fn read_table(&self) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_forecast(&self, at: GeoCoordinate) -> Result<RawForecast>;
}

/// Optional wave data layered on top of a forecast.
#[async_trait]
pub trait MarineProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch_marine(&self, at: GeoCoordinate) -> Result<RawMarine>;
}
