use crate::adapters::open_meteo::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::adapters::stormglass;
use crate::domain::model::{EstimatorConfig, VesselType};
use crate::utils::error::{MaritimeError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub estimator: EstimatorConfig,
    pub vessel: VesselConfig,
    pub ports: PortsConfig,
    pub weather: WeatherConfig,
    pub marine: MarineConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    /// Overrides `estimator.average_speed_knots` with the vessel's service speed.
    pub r#type: Option<VesselType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortsConfig {
    pub table: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Stormglass wave data, off unless `enabled = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarineConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl Default for MarineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: stormglass::DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl MarineConfig {
    /// API key when marine data is enabled; `None` when disabled.
    pub fn credentials(&self) -> Result<Option<&str>> {
        if !self.enabled {
            return Ok(None);
        }
        let key = validate_required_field("marine.api_key", &self.api_key)?;
        validate_non_empty_string("marine.api_key", key)?;
        if key.contains("${") {
            return Err(MaritimeError::InvalidConfigValueError {
                field: "marine.api_key".to_string(),
                value: key.to_string(),
                reason: "environment variable is not set".to_string(),
            });
        }
        Ok(Some(key.as_str()))
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MaritimeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MaritimeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPEN_METEO_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MaritimeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Estimator constants with the vessel override applied.
    pub fn estimator_config(&self) -> EstimatorConfig {
        match self.vessel.r#type {
            Some(vessel) => self.estimator.for_vessel(vessel),
            None => self.estimator,
        }
    }

    pub fn port_table(&self) -> Option<&str> {
        self.ports.table.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.estimator.validate()?;

        validate_url("weather.endpoint", &self.weather.endpoint)?;
        validate_range("weather.timeout_seconds", self.weather.timeout_seconds, 1, 120)?;

        if self.marine.credentials()?.is_some() {
            validate_url("marine.endpoint", &self.marine.endpoint)?;
        }

        if let Some(table) = &self.ports.table {
            validate_path("ports.table", table)?;
            validate_file_extension("ports.table", table, &["csv"])?;
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.estimator_config(), EstimatorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[estimator]
earth_radius_nm = 3440.065
average_speed_knots = 14.0
fuel_rate_per_nm = 0.2
cost_rate_per_nm = 30.0

[ports]
table = "./data/ports.csv"

[weather]
endpoint = "http://localhost:9000/v1"
timeout_seconds = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.estimator.average_speed_knots, 14.0);
        assert_eq!(config.port_table(), Some("./data/ports.csv"));
        assert_eq!(config.weather.timeout_seconds, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_vessel_override() {
        let toml_content = r#"
[estimator]
fuel_rate_per_nm = 0.3

[vessel]
type = "tanker"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let estimator = config.estimator_config();
        assert_eq!(estimator.average_speed_knots, 14.0);
        assert_eq!(estimator.fuel_rate_per_nm, 0.3);
        assert_eq!(estimator.cost_rate_per_nm, 25.0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MARITIME_TEST_WEATHER_URL", "https://weather.test/v1");

        let toml_content = r#"
[weather]
endpoint = "${MARITIME_TEST_WEATHER_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.weather.endpoint, "https://weather.test/v1");

        std::env::remove_var("MARITIME_TEST_WEATHER_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_speed = TomlConfig::from_toml_str("[estimator]\naverage_speed_knots = 0.0\n").unwrap();
        assert!(bad_speed.validate().is_err());

        let bad_url = TomlConfig::from_toml_str("[weather]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_table = TomlConfig::from_toml_str("[ports]\ntable = \"ports.xlsx\"\n").unwrap();
        assert!(bad_table.validate().is_err());
    }

    #[test]
    fn test_unknown_vessel_type_is_parse_error() {
        let result = TomlConfig::from_toml_str("[vessel]\ntype = \"submarine\"\n");
        assert!(matches!(
            result,
            Err(MaritimeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_marine_disabled_by_default() {
        let config = TomlConfig::default();
        assert!(!config.marine.enabled);
        assert_eq!(config.marine.credentials().unwrap(), None);
    }

    #[test]
    fn test_marine_enabled_requires_api_key() {
        let config = TomlConfig::from_toml_str("[marine]\nenabled = true\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(MaritimeError::MissingConfigError { .. })
        ));

        let unresolved = TomlConfig::from_toml_str(
            "[marine]\nenabled = true\napi_key = \"${MARITIME_TEST_UNSET_STORMGLASS_KEY}\"\n",
        )
        .unwrap();
        assert!(matches!(
            unresolved.validate(),
            Err(MaritimeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_marine_api_key_from_environment() {
        std::env::set_var("MARITIME_TEST_STORMGLASS_KEY", "sg-test-key");

        let toml_content = r#"
[marine]
enabled = true
api_key = "${MARITIME_TEST_STORMGLASS_KEY}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.marine.credentials().unwrap(), Some("sg-test-key"));
        assert_eq!(config.marine.endpoint, "https://api.stormglass.io/v2");

        std::env::remove_var("MARITIME_TEST_STORMGLASS_KEY");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[estimator]\ncost_rate_per_nm = 40.0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.estimator.cost_rate_per_nm, 40.0);
    }
}
