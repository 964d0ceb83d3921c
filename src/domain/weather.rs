use crate::domain::model::GeoCoordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subset of an Open-Meteo `/forecast` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub current: Option<RawCurrent>,
    #[serde(default)]
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCurrent {
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Subset of a Stormglass `/weather/point` response. Each parameter carries one
/// value per upstream source; only the blended `sg` value is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMarine {
    #[serde(default)]
    pub hours: Vec<RawMarineHour>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMarineHour {
    pub time: Option<String>,
    pub wave_height: Option<SourceValues>,
    pub wave_direction: Option<SourceValues>,
    pub wave_period: Option<SourceValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceValues {
    pub sg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarineSummary {
    pub wave_height_m: Option<f64>,
    pub wave_direction_deg: Option<f64>,
    pub wave_period_s: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
    pub weather_code: Option<u32>,
    pub weather_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub precipitation: Option<f64>,
    pub max_wind_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaritimeInsights {
    pub operational_impact: Vec<String>,
    pub safety_considerations: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub port_name: String,
    pub coordinate: GeoCoordinate,
    pub timestamp: DateTime<Utc>,
    pub current_weather: CurrentWeather,
    pub daily_forecast: Vec<DailyForecast>,
    pub maritime_insights: MaritimeInsights,
    pub source: String,
    #[serde(default)]
    pub marine: Option<MarineSummary>,
}
