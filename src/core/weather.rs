use crate::core::registry::PortRegistry;
use crate::domain::model::GeoCoordinate;
use crate::domain::ports::{MarineProvider, WeatherProvider};
use crate::domain::weather::{
    CurrentWeather, DailyForecast, MarineSummary, MaritimeInsights, RawForecast, RawMarine,
    SourceValues, WeatherReport,
};
use crate::utils::error::Result;
use chrono::{Duration, Utc};

const HIGH_WIND_KMH: f64 = 25.0;
const MODERATE_WIND_KMH: f64 = 15.0;
const HEAVY_PRECIPITATION_MM: f64 = 5.0;
const HIGH_WAVE_M: f64 = 2.5;
const FORECAST_DAYS: usize = 3;

/// Label for forecasts requested by raw coordinates.
pub const CUSTOM_LOCATION: &str = "Custom Location";

/// WMO weather interpretation codes.
pub fn describe_weather_code(code: u32) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        other => return format!("Unknown weather (code: {})", other),
    };
    text.to_string()
}

pub fn maritime_insights(current: &CurrentWeather) -> MaritimeInsights {
    let mut insights = MaritimeInsights::default();

    match current.wind_speed {
        Some(wind) if wind > HIGH_WIND_KMH => {
            insights
                .operational_impact
                .push("High winds may affect cargo operations".to_string());
            insights
                .safety_considerations
                .push("Monitor wind conditions for safe operations".to_string());
        }
        Some(wind) if wind > MODERATE_WIND_KMH => {
            insights
                .operational_impact
                .push("Moderate winds - normal operations possible".to_string());
        }
        _ => {}
    }

    if current.precipitation.unwrap_or(0.0) > HEAVY_PRECIPITATION_MM {
        insights
            .operational_impact
            .push("Heavy precipitation may delay cargo operations".to_string());
        insights
            .recommendations
            .push("Consider weather working days in laytime calculations".to_string());
    }

    if current.weather_description.to_lowercase().contains("fog") {
        insights
            .operational_impact
            .push("Reduced visibility may affect port operations".to_string());
        insights
            .safety_considerations
            .push("Monitor visibility for safe navigation".to_string());
    }

    insights.recommendations.extend(
        [
            "Check local port authority weather reports",
            "Monitor marine weather broadcasts",
            "Document weather-related delays",
            "Consider seasonal weather patterns",
        ]
        .map(String::from),
    );

    insights
}

pub fn build_report(
    port_name: &str,
    coordinate: GeoCoordinate,
    raw: RawForecast,
    source: &str,
) -> WeatherReport {
    let now = Utc::now();
    let current = raw.current.unwrap_or_default();
    let weather_code = current.weather_code;

    let current_weather = CurrentWeather {
        temperature: current.temperature_2m,
        humidity: current.relative_humidity_2m,
        wind_speed: current.wind_speed_10m,
        wind_direction: current.wind_direction_10m,
        precipitation: current.precipitation,
        weather_code,
        weather_description: describe_weather_code(weather_code.unwrap_or(0)),
    };

    let daily = raw.daily.unwrap_or_default();
    let pick = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();
    let daily_forecast = (0..FORECAST_DAYS.min(daily.temperature_2m_max.len()))
        .map(|i| DailyForecast {
            date: daily
                .time
                .get(i)
                .cloned()
                .unwrap_or_else(|| (now + Duration::days(i as i64 + 1)).format("%A").to_string()),
            max_temp: pick(&daily.temperature_2m_max, i),
            min_temp: pick(&daily.temperature_2m_min, i),
            precipitation: pick(&daily.precipitation_sum, i),
            max_wind_speed: pick(&daily.wind_speed_10m_max, i),
        })
        .collect();

    let maritime_insights = maritime_insights(&current_weather);

    WeatherReport {
        port_name: port_name.to_string(),
        coordinate,
        timestamp: now,
        current_weather,
        daily_forecast,
        maritime_insights,
        source: source.to_string(),
        marine: None,
    }
}

/// First hour of a Stormglass response, or `None` when it has no hours.
pub fn marine_summary(raw: &RawMarine) -> Option<MarineSummary> {
    let hour = raw.hours.first()?;
    let sg = |values: &Option<SourceValues>| values.as_ref().and_then(|v| v.sg);
    Some(MarineSummary {
        wave_height_m: sg(&hour.wave_height),
        wave_direction_deg: sg(&hour.wave_direction),
        wave_period_s: sg(&hour.wave_period),
    })
}

pub fn attach_marine(report: &mut WeatherReport, marine: MarineSummary) {
    if marine.wave_height_m.is_some_and(|h| h > HIGH_WAVE_M) {
        report
            .maritime_insights
            .safety_considerations
            .push("High wave heights may affect berthing/loading".to_string());
    }
    report.marine = Some(marine);
}

/// Port-aware forecast lookups on top of a [`WeatherProvider`].
pub struct WeatherService<'a, W: WeatherProvider> {
    provider: W,
    marine: Option<Box<dyn MarineProvider>>,
    registry: &'a PortRegistry,
}

impl<'a, W: WeatherProvider> WeatherService<'a, W> {
    pub fn new(provider: W, registry: &'a PortRegistry) -> Self {
        Self {
            provider,
            marine: None,
            registry,
        }
    }

    /// Adds wave data to every report. Marine failures are logged and the
    /// report is returned without it.
    pub fn with_marine(mut self, marine: impl MarineProvider + 'static) -> Self {
        self.marine = Some(Box::new(marine));
        self
    }

    pub async fn forecast_for_port(&self, identifier: &str) -> Result<WeatherReport> {
        let port = self.registry.resolve(identifier)?;
        self.forecast_at(&port.name, port.coordinate).await
    }

    pub async fn forecast_at(&self, label: &str, coordinate: GeoCoordinate) -> Result<WeatherReport> {
        tracing::debug!(provider = self.provider.name(), %coordinate, "Fetching forecast");
        let raw = self.provider.fetch_forecast(coordinate).await?;
        let mut report = build_report(label, coordinate, raw, self.provider.name());

        if let Some(marine) = &self.marine {
            match marine.fetch_marine(coordinate).await {
                Ok(raw) => {
                    if let Some(summary) = marine_summary(&raw) {
                        attach_marine(&mut report, summary);
                    }
                }
                Err(e) => tracing::warn!(provider = marine.name(), "Marine data skipped: {}", e),
            }
        }

        Ok(report)
    }

    pub async fn forecast_for_coordinates(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        let coordinate = GeoCoordinate::new(lat, lon)?;
        self.forecast_at(CUSTOM_LOCATION, coordinate).await
    }
}
