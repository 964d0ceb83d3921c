use crate::domain::model::{GeoCoordinate, Port, PortCategory};
use crate::domain::ports::PortTableSource;
use crate::utils::error::{MaritimeError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Immutable code → port lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct PortRegistry {
    ports: HashMap<String, Port>,
    order: Vec<String>,
}

struct BuiltinPort {
    code: &'static str,
    name: &'static str,
    country: &'static str,
    lat: f64,
    lon: f64,
    facilities: &'static [&'static str],
    max_draft_m: f64,
    tidal_range_m: f64,
    restrictions: &'static [&'static str],
    categories: &'static [PortCategory],
}

use crate::domain::model::PortCategory::{Bulk, Chemical, Container, Lng, Oil};

const CONTAINER: &str = "Container Terminal";
const BULK: &str = "Bulk Terminal";
const OIL: &str = "Oil Terminal";
const LNG: &str = "LNG Terminal";
const VTS: &str = "VTS mandatory";
const PILOT: &str = "Pilot required";

const BUILTIN_PORTS: &[BuiltinPort] = &[
    BuiltinPort {
        code: "SGSIN",
        name: "Singapore",
        country: "Singapore",
        lat: 1.2905,
        lon: 103.8520,
        facilities: &[CONTAINER, BULK, OIL, LNG],
        max_draft_m: 15.0,
        tidal_range_m: 2.5,
        restrictions: &[VTS, PILOT],
        categories: &[Container, Oil, Lng],
    },
    BuiltinPort {
        code: "INBOM",
        name: "Mumbai",
        country: "India",
        lat: 19.0760,
        lon: 72.8777,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 14.5,
        tidal_range_m: 4.5,
        restrictions: &[PILOT, "Tidal restrictions"],
        categories: &[Bulk, Oil],
    },
    BuiltinPort {
        code: "INMAA",
        name: "Chennai",
        country: "India",
        lat: 13.0827,
        lon: 80.2707,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 16.5,
        tidal_range_m: 1.2,
        restrictions: &[PILOT, "24/7 operations"],
        categories: &[Bulk, Oil],
    },
    BuiltinPort {
        code: "INCCU",
        name: "Kolkata",
        country: "India",
        lat: 22.5726,
        lon: 88.3639,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 12.5,
        tidal_range_m: 4.2,
        restrictions: &[PILOT, "Tidal restrictions", "River navigation"],
        categories: &[Bulk, Oil],
    },
    BuiltinPort {
        code: "INVIZ",
        name: "Vishakapatnam",
        country: "India",
        lat: 17.6868,
        lon: 83.2185,
        facilities: &[CONTAINER, BULK, OIL, "Iron Ore Terminal"],
        max_draft_m: 18.0,
        tidal_range_m: 1.8,
        restrictions: &[PILOT, "24/7 operations"],
        categories: &[Bulk, Oil],
    },
    BuiltinPort {
        code: "NLRTM",
        name: "Rotterdam",
        country: "Netherlands",
        lat: 51.9225,
        lon: 4.4792,
        facilities: &[CONTAINER, BULK, OIL, LNG],
        max_draft_m: 24.0,
        tidal_range_m: 1.8,
        restrictions: &[VTS, PILOT],
        categories: &[Container, Bulk, Oil, Lng, Chemical],
    },
    BuiltinPort {
        code: "CNSHA",
        name: "Shanghai",
        country: "China",
        lat: 31.2304,
        lon: 121.4737,
        facilities: &[CONTAINER, BULK, OIL, LNG],
        max_draft_m: 17.5,
        tidal_range_m: 4.5,
        restrictions: &[VTS, PILOT, "Tidal restrictions"],
        categories: &[Container, Bulk, Oil, Lng, Chemical],
    },
    BuiltinPort {
        code: "USLAX",
        name: "Los Angeles",
        country: "United States",
        lat: 34.0522,
        lon: -118.2437,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 16.0,
        tidal_range_m: 1.5,
        restrictions: &[VTS, PILOT],
        categories: &[Container, Bulk, Oil],
    },
    BuiltinPort {
        code: "USNYC",
        name: "New York",
        country: "United States",
        lat: 40.7128,
        lon: -74.0060,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 15.0,
        tidal_range_m: 1.4,
        restrictions: &[VTS, PILOT, "Hudson River navigation"],
        categories: &[Container, Bulk, Oil],
    },
    BuiltinPort {
        code: "DEHAM",
        name: "Hamburg",
        country: "Germany",
        lat: 53.5511,
        lon: 9.9937,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 15.5,
        tidal_range_m: 3.6,
        restrictions: &[VTS, PILOT, "Elbe River navigation"],
        categories: &[Container, Bulk, Oil],
    },
    BuiltinPort {
        code: "BEANR",
        name: "Antwerp",
        country: "Belgium",
        lat: 51.2194,
        lon: 4.4025,
        facilities: &[CONTAINER, BULK, OIL, "Chemical Terminal"],
        max_draft_m: 17.5,
        tidal_range_m: 5.0,
        restrictions: &[VTS, PILOT, "Scheldt River navigation"],
        categories: &[Container, Bulk, Oil, Chemical],
    },
    BuiltinPort {
        code: "AEDXB",
        name: "Dubai",
        country: "United Arab Emirates",
        lat: 25.2048,
        lon: 55.2708,
        facilities: &[CONTAINER, BULK, OIL, LNG],
        max_draft_m: 16.0,
        tidal_range_m: 1.8,
        restrictions: &[VTS, PILOT],
        categories: &[Container, Oil, Lng],
    },
    BuiltinPort {
        code: "HKHKG",
        name: "Hong Kong",
        country: "Hong Kong",
        lat: 22.3193,
        lon: 114.1694,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 17.5,
        tidal_range_m: 2.0,
        restrictions: &[VTS, PILOT],
        categories: &[Container],
    },
    BuiltinPort {
        code: "JPTYO",
        name: "Tokyo",
        country: "Japan",
        lat: 35.6762,
        lon: 139.6503,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 16.0,
        tidal_range_m: 1.8,
        restrictions: &[VTS, PILOT],
        categories: &[Container],
    },
    BuiltinPort {
        code: "KRBUS",
        name: "Busan",
        country: "South Korea",
        lat: 35.1796,
        lon: 129.0756,
        facilities: &[CONTAINER, BULK, OIL],
        max_draft_m: 17.0,
        tidal_range_m: 1.5,
        restrictions: &[VTS, PILOT],
        categories: &[Container],
    },
];

impl BuiltinPort {
    fn to_port(&self) -> Port {
        Port {
            code: self.code.to_string(),
            name: self.name.to_string(),
            country: self.country.to_string(),
            coordinate: GeoCoordinate::from_static(self.lat, self.lon),
            facilities: self.facilities.iter().map(|s| s.to_string()).collect(),
            max_draft_m: Some(self.max_draft_m),
            tidal_range_m: Some(self.tidal_range_m),
            restrictions: self.restrictions.iter().map(|s| s.to_string()).collect(),
            categories: self.categories.to_vec(),
        }
    }
}

/// One row of a CSV port table. List columns are `;`-separated.
#[derive(Debug, Deserialize)]
struct PortRow {
    code: String,
    name: String,
    country: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    facilities: Option<String>,
    #[serde(default)]
    max_draft_m: Option<f64>,
    #[serde(default)]
    tidal_range_m: Option<f64>,
    #[serde(default)]
    restrictions: Option<String>,
    #[serde(default)]
    categories: Option<String>,
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl PortRow {
    fn into_port(self, line: usize) -> Result<Port> {
        let code = self.code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(MaritimeError::PortTableError {
                message: format!("row {}: empty port code", line),
            });
        }

        let coordinate = GeoCoordinate::new(self.lat, self.lon).map_err(|e| {
            MaritimeError::PortTableError {
                message: format!("row {} ({}): {}", line, code, e),
            }
        })?;

        let categories = split_list(self.categories)
            .iter()
            .map(|c| c.parse::<PortCategory>())
            .collect::<Result<Vec<_>>>()
            .map_err(|e| MaritimeError::PortTableError {
                message: format!("row {} ({}): {}", line, code, e),
            })?;

        Ok(Port {
            code,
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            coordinate,
            facilities: split_list(self.facilities),
            max_draft_m: self.max_draft_m,
            tidal_range_m: self.tidal_range_m,
            restrictions: split_list(self.restrictions),
            categories,
        })
    }
}

impl PortRegistry {
    /// The major ports shipped with the crate.
    pub fn builtin() -> Self {
        let ports = BUILTIN_PORTS.iter().map(BuiltinPort::to_port).collect::<Vec<_>>();
        let order = ports.iter().map(|p| p.code.clone()).collect();
        let ports = ports.into_iter().map(|p| (p.code.clone(), p)).collect();
        Self { ports, order }
    }

    pub fn from_ports(ports: Vec<Port>) -> Result<Self> {
        let mut map = HashMap::with_capacity(ports.len());
        let mut order = Vec::with_capacity(ports.len());

        for mut port in ports {
            port.code = port.code.trim().to_ascii_uppercase();
            if map.contains_key(&port.code) {
                return Err(MaritimeError::PortTableError {
                    message: format!("duplicate port code {}", port.code),
                });
            }
            order.push(port.code.clone());
            map.insert(port.code.clone(), port);
        }

        if map.is_empty() {
            return Err(MaritimeError::PortTableError {
                message: "port table contains no ports".to_string(),
            });
        }

        Ok(Self { ports: map, order })
    }

    /// Parses a CSV table with at least `code,name,country,lat,lon` columns.
    pub fn from_csv(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut ports = Vec::new();
        for (index, row) in reader.deserialize::<PortRow>().enumerate() {
            // header is line 1
            ports.push(row?.into_port(index + 2)?);
        }

        tracing::debug!("Parsed {} ports from CSV table", ports.len());
        Self::from_ports(ports)
    }

    pub async fn load<S: PortTableSource>(source: &S) -> Result<Self> {
        tracing::info!("Loading port table from {}", source.describe());
        let data = source.read_table().await?;
        let registry = Self::from_csv(&data)?;
        tracing::info!("Loaded {} ports", registry.len());
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ports in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.order.iter().filter_map(|code| self.ports.get(code))
    }

    /// Exact UN/LOCODE lookup, case-insensitive.
    pub fn get(&self, code: &str) -> Result<&Port> {
        let key = code.trim().to_ascii_uppercase();
        self.ports
            .get(&key)
            .ok_or_else(|| MaritimeError::InvalidPortCode {
                code: code.trim().to_string(),
            })
    }

    /// Looks up by code, then by name substring, then by any word of the name.
    pub fn resolve(&self, identifier: &str) -> Result<&Port> {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return Err(MaritimeError::InvalidPortCode {
                code: identifier.to_string(),
            });
        }

        if let Ok(port) = self.get(&needle) {
            return Ok(port);
        }

        if let Some(port) = self.iter().find(|p| p.name.to_lowercase().contains(&needle)) {
            return Ok(port);
        }

        let words: Vec<&str> = needle.split_whitespace().collect();
        self.iter()
            .find(|p| {
                let name = p.name.to_lowercase();
                words.iter().any(|w| name.contains(w))
            })
            .ok_or_else(|| MaritimeError::InvalidPortCode {
                code: identifier.trim().to_string(),
            })
    }

    /// Substring match on name, country or facilities, optionally limited to a category.
    pub fn search(&self, query: &str, category: Option<PortCategory>) -> Vec<&Port> {
        let needle = query.trim().to_lowercase();
        self.iter()
            .filter(|p| category.map_or(true, |c| p.in_category(c)))
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.country.to_lowercase().contains(&needle)
                    || p
                        .facilities
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn by_category(&self, category: PortCategory) -> Vec<&Port> {
        self.iter().filter(|p| p.in_category(category)).collect()
    }
}

impl Default for PortRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let registry = PortRegistry::builtin();
        assert_eq!(registry.len(), 15);
        assert_eq!(registry.iter().next().unwrap().code, "SGSIN");
        assert_eq!(registry.get("nlrtm").unwrap().name, "Rotterdam");
    }

    #[test]
    fn test_unknown_code_is_structured_error() {
        let registry = PortRegistry::builtin();
        match registry.get("ZZZZZ") {
            Err(MaritimeError::InvalidPortCode { code }) => assert_eq!(code, "ZZZZZ"),
            other => panic!("expected InvalidPortCode, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_by_code_name_and_word() {
        let registry = PortRegistry::builtin();
        assert_eq!(registry.resolve("CNSHA").unwrap().name, "Shanghai");
        assert_eq!(registry.resolve("rotter").unwrap().code, "NLRTM");
        assert_eq!(registry.resolve("port of angeles").unwrap().code, "USLAX");
        assert!(registry.resolve("").is_err());
        assert!(registry.resolve("Atlantis").is_err());
    }

    #[test]
    fn test_search_and_categories() {
        let registry = PortRegistry::builtin();

        let india: Vec<&str> = registry
            .search("india", None)
            .iter()
            .map(|p| p.code.as_str())
            .collect();
        assert_eq!(india, vec!["INBOM", "INMAA", "INCCU", "INVIZ"]);

        let lng_terminals = registry.search("lng", Some(PortCategory::Lng));
        assert_eq!(lng_terminals.len(), 4);

        let chemical: Vec<&str> = registry
            .by_category(PortCategory::Chemical)
            .iter()
            .map(|p| p.code.as_str())
            .collect();
        assert_eq!(chemical, vec!["NLRTM", "CNSHA", "BEANR"]);
    }

    #[test]
    fn test_from_csv_minimal_columns() {
        let csv = "code,name,country,lat,lon\nsgsin,Singapore,Singapore,1.2905,103.852\n";
        let registry = PortRegistry::from_csv(csv.as_bytes()).unwrap();
        let port = registry.get("SGSIN").unwrap();
        assert!(port.facilities.is_empty());
        assert_eq!(port.max_draft_m, None);
    }

    #[test]
    fn test_from_csv_rejects_duplicates_and_bad_coordinates() {
        let dup = "code,name,country,lat,lon\nAAAAA,A,X,1,1\naaaaa,B,X,2,2\n";
        assert!(matches!(
            PortRegistry::from_csv(dup.as_bytes()),
            Err(MaritimeError::PortTableError { .. })
        ));

        let bad = "code,name,country,lat,lon\nAAAAA,A,X,95,1\n";
        assert!(matches!(
            PortRegistry::from_csv(bad.as_bytes()),
            Err(MaritimeError::PortTableError { .. })
        ));

        let empty = "code,name,country,lat,lon\n";
        assert!(PortRegistry::from_csv(empty.as_bytes()).is_err());
    }
}
