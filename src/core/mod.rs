pub mod carbon;
pub mod checklist;
pub mod estimator;
pub mod geo;
pub mod insights;
pub mod registry;
pub mod service;
pub mod weather;

pub use crate::domain::model::{GeoCoordinate, Port, RouteEstimate};
pub use crate::domain::ports::{PortTableSource, WeatherProvider};
pub use crate::utils::error::Result;
