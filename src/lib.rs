pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3PortTable};

pub use adapters::{open_meteo::OpenMeteoClient, stormglass::StormglassClient};
pub use config::{cli::LocalPortTable, toml_config::TomlConfig};
pub use crate::core::{
    estimator::RouteEstimator,
    registry::PortRegistry,
    service::{RouteRequest, RouteResponse, RouteService},
    weather::WeatherService,
};
pub use domain::model::{EstimatorConfig, GeoCoordinate, Port, RouteEstimate};
pub use utils::error::{MaritimeError, Result};
