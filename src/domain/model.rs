use crate::utils::error::{MaritimeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point on the Earth's surface in decimal degrees.
///
/// Values built through [`GeoCoordinate::new`] or deserialization are finite and
/// inside the valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = MaritimeError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        GeoCoordinate::new(raw.lat, raw.lon)
    }
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() {
            return Err(MaritimeError::invalid_coordinate("lat", lat, "not a finite number"));
        }
        if !lon.is_finite() {
            return Err(MaritimeError::invalid_coordinate("lon", lon, "not a finite number"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MaritimeError::invalid_coordinate(
                "lat",
                lat,
                "latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(MaritimeError::invalid_coordinate(
                "lon",
                lon,
                "longitude must be between -180 and 180",
            ));
        }
        Ok(Self { lat, lon })
    }

    /// For literal reference data that is known to be in range.
    pub(crate) const fn from_static(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PortCategory {
    Container,
    Bulk,
    Oil,
    Lng,
    Chemical,
}

impl PortCategory {
    pub const ALL: [PortCategory; 5] = [
        PortCategory::Container,
        PortCategory::Bulk,
        PortCategory::Oil,
        PortCategory::Lng,
        PortCategory::Chemical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortCategory::Container => "container",
            PortCategory::Bulk => "bulk",
            PortCategory::Oil => "oil",
            PortCategory::Lng => "lng",
            PortCategory::Chemical => "chemical",
        }
    }
}

impl FromStr for PortCategory {
    type Err = MaritimeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        PortCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| MaritimeError::validation(format!("Unknown port category: {}", s)))
    }
}

/// Static port reference data, keyed by UN/LOCODE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub code: String,
    pub name: String,
    pub country: String,
    pub coordinate: GeoCoordinate,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub max_draft_m: Option<f64>,
    #[serde(default)]
    pub tidal_range_m: Option<f64>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub categories: Vec<PortCategory>,
}

impl Port {
    pub fn in_category(&self, category: PortCategory) -> bool {
        self.categories.contains(&category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum VesselType {
    Container,
    Bulk,
    Tanker,
    Lng,
    Lpg,
    #[default]
    General,
}

impl VesselType {
    pub const ALL: [VesselType; 6] = [
        VesselType::Container,
        VesselType::Bulk,
        VesselType::Tanker,
        VesselType::Lng,
        VesselType::Lpg,
        VesselType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VesselType::Container => "container",
            VesselType::Bulk => "bulk",
            VesselType::Tanker => "tanker",
            VesselType::Lng => "lng",
            VesselType::Lpg => "lpg",
            VesselType::General => "general",
        }
    }

    /// Typical service speed in knots.
    pub fn service_speed_knots(&self) -> f64 {
        match self {
            VesselType::Container => 20.0,
            VesselType::Bulk => 12.0,
            VesselType::Tanker => 14.0,
            VesselType::Lng => 18.0,
            VesselType::Lpg => 16.0,
            VesselType::General => 12.0,
        }
    }

    /// Specific fuel consumption at sea, tons per day.
    pub fn daily_fuel_consumption_tons(&self) -> f64 {
        match self {
            VesselType::Container => 50.0,
            VesselType::Bulk => 35.0,
            VesselType::Tanker => 40.0,
            VesselType::Lng => 60.0,
            VesselType::Lpg | VesselType::General => 30.0,
        }
    }

    /// Unknown names map to `General`.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for VesselType {
    type Err = MaritimeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        VesselType::ALL
            .into_iter()
            .find(|v| v.as_str() == key)
            .ok_or_else(|| MaritimeError::validation(format!("Unknown vessel type: {}", s)))
    }
}

impl fmt::Display for VesselType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FuelType {
    Hfo,
    #[default]
    Vlsfo,
    Mgo,
    Lng,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [FuelType::Hfo, FuelType::Vlsfo, FuelType::Mgo, FuelType::Lng];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Hfo => "hfo",
            FuelType::Vlsfo => "vlsfo",
            FuelType::Mgo => "mgo",
            FuelType::Lng => "lng",
        }
    }

    /// kg CO2 emitted per ton of fuel burned.
    pub fn emission_factor_kg_per_ton(&self) -> f64 {
        match self {
            FuelType::Hfo | FuelType::Vlsfo => 3114.0,
            FuelType::Mgo => 3206.0,
            FuelType::Lng => 2750.0,
        }
    }

    /// Unknown names map to `Vlsfo`.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for FuelType {
    type Err = MaritimeError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        FuelType::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| MaritimeError::validation(format!("Unknown fuel type: {}", s)))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_EARTH_RADIUS_NM: f64 = 3440.065;
pub const DEFAULT_AVERAGE_SPEED_KNOTS: f64 = 12.0;
pub const DEFAULT_FUEL_RATE_PER_NM: f64 = 0.15;
pub const DEFAULT_COST_RATE_PER_NM: f64 = 25.0;

/// Constants used by the route estimator. Swap these per vessel class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub earth_radius_nm: f64,
    pub average_speed_knots: f64,
    pub fuel_rate_per_nm: f64,
    pub cost_rate_per_nm: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            earth_radius_nm: DEFAULT_EARTH_RADIUS_NM,
            average_speed_knots: DEFAULT_AVERAGE_SPEED_KNOTS,
            fuel_rate_per_nm: DEFAULT_FUEL_RATE_PER_NM,
            cost_rate_per_nm: DEFAULT_COST_RATE_PER_NM,
        }
    }
}

impl EstimatorConfig {
    pub fn for_vessel(self, vessel: VesselType) -> Self {
        Self {
            average_speed_knots: vessel.service_speed_knots(),
            ..self
        }
    }
}

/// Transit time split into whole days and the remaining hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eta {
    pub total_hours: f64,
    pub days: u64,
    pub hours: f64,
}

impl Eta {
    pub fn from_hours(total_hours: f64) -> Self {
        let total_hours = total_hours.max(0.0);
        let days = (total_hours / 24.0).floor();
        Self {
            total_hours,
            days: days as u64,
            hours: total_hours - days * 24.0,
        }
    }

    pub fn total_days(&self) -> f64 {
        self.total_hours / 24.0
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days {:.1} hours", self.days, self.hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedEta {
    pub speed_knots: f64,
    pub eta: Eta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    pub origin: String,
    pub destination: String,
    pub distance_nm: f64,
    pub distance_km: f64,
    pub distance_mi: f64,
    pub average_speed_knots: f64,
    pub eta: Eta,
    pub fuel_tons: f64,
    pub estimated_cost: f64,
}
