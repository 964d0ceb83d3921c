pub mod cli;
pub mod toml_config;

#[cfg(feature = "lambda")]
pub mod lambda;

#[cfg(feature = "cli")]
pub use self::args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use crate::domain::model::{FuelType, PortCategory, VesselType};
    use crate::utils::error::{MaritimeError, Result};
    use crate::utils::validation::{validate_file_extension, validate_path, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "maritime-ops")]
    #[command(about = "Great-circle voyage estimates, port lookups and voyage tools")]
    pub struct CliConfig {
        /// TOML settings file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// CSV port table replacing the built-in ports
        #[arg(long, global = true)]
        pub port_table: Option<String>,

        /// Print JSON instead of text
        #[arg(long, global = true)]
        pub json: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Great-circle distance, ETA, fuel and cost between two ports
        Distance {
            /// Origin port code or name
            origin: String,
            /// Destination port code or name
            destination: String,
            #[arg(long, value_enum)]
            vessel: Option<VesselType>,
        },
        /// Details for one port
        Port { identifier: String },
        /// List or search ports
        Ports {
            #[arg(long)]
            search: Option<String>,
            #[arg(long, value_enum)]
            category: Option<PortCategory>,
        },
        /// CO2 estimate for a voyage
        Carbon {
            #[arg(long)]
            distance_nm: f64,
            /// Days at sea; derived from distance and vessel speed when omitted
            #[arg(long)]
            days: Option<f64>,
            #[arg(long, value_enum, default_value_t = FuelType::Vlsfo)]
            fuel: FuelType,
            #[arg(long, value_enum, default_value_t = VesselType::General)]
            vessel: VesselType,
        },
        /// Checklist for a voyage stage (pre-fixture, on-voyage, post-voyage)
        Checklist { stage: String },
        /// Forecast and maritime insights for a port or a coordinate pair
        Weather {
            /// Port code or name
            port: Option<String>,
            #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "port")]
            lat: Option<f64>,
            #[arg(long, allow_negative_numbers = true, requires = "lat", conflicts_with = "port")]
            lon: Option<f64>,
        },
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.config {
                validate_path("config", path)?;
                validate_file_extension("config", path, &["toml"])?;
            }
            if let Some(path) = &self.port_table {
                validate_path("port_table", path)?;
                validate_file_extension("port_table", path, &["csv"])?;
            }
            if let Command::Weather {
                port: None,
                lat: None,
                ..
            } = &self.command
            {
                return Err(MaritimeError::validation(
                    "weather needs a port or both --lat and --lon",
                ));
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_weather_by_coordinates() {
            let cli = CliConfig::try_parse_from([
                "maritime-ops", "weather", "--lat", "-33.8688", "--lon", "151.2093",
            ])
            .unwrap();
            assert!(cli.validate().is_ok());
            match cli.command {
                Command::Weather { port, lat, lon } => {
                    assert_eq!(port, None);
                    assert_eq!(lat, Some(-33.8688));
                    assert_eq!(lon, Some(151.2093));
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_weather_needs_a_location() {
            let cli = CliConfig::try_parse_from(["maritime-ops", "weather"]).unwrap();
            assert!(matches!(
                cli.validate(),
                Err(MaritimeError::ValidationError { .. })
            ));

            assert!(CliConfig::try_parse_from(["maritime-ops", "weather", "--lat", "1.0"]).is_err());
            assert!(CliConfig::try_parse_from([
                "maritime-ops", "weather", "SGSIN", "--lat", "1.0", "--lon", "2.0",
            ])
            .is_err());
        }

        #[test]
        fn test_weather_by_port() {
            let cli = CliConfig::try_parse_from(["maritime-ops", "weather", "SGSIN"]).unwrap();
            assert!(cli.validate().is_ok());
        }
    }
}
