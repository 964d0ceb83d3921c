use crate::domain::model::Port;
use serde::{Deserialize, Serialize};

const COASTAL_LIMIT_NM: f64 = 500.0;
const REGIONAL_LIMIT_NM: f64 = 2000.0;
// Tropic of Cancer/Capricorn (23.44°) widened to the cyclone-exposed
// Gulf ports, e.g. Dubai at 25.2°N.
const TROPICAL_BAND_LATITUDE: f64 = 26.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    Coastal,
    Regional,
    Oceanic,
}

impl RouteClass {
    pub fn for_distance(distance_nm: f64) -> Self {
        if distance_nm < COASTAL_LIMIT_NM {
            RouteClass::Coastal
        } else if distance_nm < REGIONAL_LIMIT_NM {
            RouteClass::Regional
        } else {
            RouteClass::Oceanic
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteClass::Coastal => "coastal",
            RouteClass::Regional => "regional",
            RouteClass::Oceanic => "oceanic",
        }
    }

    fn considerations(&self) -> &'static [&'static str] {
        match self {
            RouteClass::Coastal => &[
                "Coastal navigation - monitor local traffic",
                "Frequent port calls possible",
                "Consider bunkering opportunities",
            ],
            RouteClass::Regional => &[],
            RouteClass::Oceanic => &[
                "Oceanic passage - plan for extended periods at sea",
                "Monitor weather routing",
                "Consider bunkering strategy",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortApproach {
    pub depth: String,
    pub tidal_range: String,
    pub notes: String,
}

impl PortApproach {
    pub fn for_port(code: &str) -> Self {
        let (depth, tidal_range, notes) = match code {
            "SGSIN" => ("15m", "2.5m", "Deep water approach, busy traffic"),
            "NLRTM" => ("24m", "1.8m", "Deep water, Europort access"),
            "CNSHA" => ("17.5m", "4.5m", "Yangtze River approach, strong currents"),
            "USLAX" => ("16m", "1.5m", "San Pedro Bay, moderate traffic"),
            "USNYC" => ("15m", "1.4m", "Hudson River approach, busy port"),
            _ => ("Varies", "Varies", "Check port authority information"),
        };
        Self {
            depth: depth.to_string(),
            tidal_range: tidal_range.to_string(),
            notes: notes.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInsights {
    pub route_class: RouteClass,
    pub operational_considerations: Vec<String>,
    pub weather_zones: Vec<String>,
    pub origin_approach: PortApproach,
    pub destination_approach: PortApproach,
}

fn is_tropical(port: &Port) -> bool {
    port.coordinate.lat().abs() <= TROPICAL_BAND_LATITUDE
}

pub fn route_insights(origin: &Port, destination: &Port, distance_nm: f64) -> RouteInsights {
    let route_class = RouteClass::for_distance(distance_nm);

    let mut weather_zones = Vec::new();
    if is_tropical(origin) || is_tropical(destination) {
        weather_zones.push("Tropical waters - monitor cyclone activity".to_string());
    }

    RouteInsights {
        route_class,
        operational_considerations: route_class
            .considerations()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        weather_zones,
        origin_approach: PortApproach::for_port(&origin.code),
        destination_approach: PortApproach::for_port(&destination.code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::PortRegistry;

    #[test]
    fn test_route_class_boundaries() {
        assert_eq!(RouteClass::for_distance(0.0), RouteClass::Coastal);
        assert_eq!(RouteClass::for_distance(499.9), RouteClass::Coastal);
        assert_eq!(RouteClass::for_distance(500.0), RouteClass::Regional);
        assert_eq!(RouteClass::for_distance(2000.0), RouteClass::Oceanic);
    }

    #[test]
    fn test_tropical_zone_and_approaches() {
        let registry = PortRegistry::builtin();
        let singapore = registry.get("SGSIN").unwrap();
        let rotterdam = registry.get("NLRTM").unwrap();
        let hamburg = registry.get("DEHAM").unwrap();

        let insights = route_insights(singapore, rotterdam, 5688.0);
        assert_eq!(insights.route_class, RouteClass::Oceanic);
        assert_eq!(insights.weather_zones.len(), 1);
        assert_eq!(insights.origin_approach.depth, "15m");
        assert_eq!(insights.operational_considerations.len(), 3);

        let north_sea = route_insights(rotterdam, hamburg, 250.0);
        assert!(north_sea.weather_zones.is_empty());
        assert_eq!(north_sea.destination_approach.depth, "Varies");
    }

    #[test]
    fn test_tropical_band_covers_gulf_and_south_asia() {
        let registry = PortRegistry::builtin();
        let dubai = registry.get("AEDXB").unwrap();
        let rotterdam = registry.get("NLRTM").unwrap();

        let insights = route_insights(dubai, rotterdam, 3000.0);
        assert_eq!(
            insights.weather_zones,
            vec!["Tropical waters - monitor cyclone activity".to_string()]
        );

        let tropical: Vec<&str> = registry
            .iter()
            .filter(|port| is_tropical(port))
            .map(|port| port.code.as_str())
            .collect();
        assert_eq!(
            tropical,
            vec!["SGSIN", "INBOM", "INMAA", "INCCU", "INVIZ", "AEDXB", "HKHKG"]
        );
    }
}
