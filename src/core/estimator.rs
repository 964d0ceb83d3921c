use crate::core::geo;
use crate::domain::model::{EstimatorConfig, Eta, GeoCoordinate, Port, RouteEstimate, SpeedEta};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_negative, validate_positive, Validate};

/// Speeds quoted alongside the configured one.
pub const ALTERNATIVE_SPEEDS_KNOTS: [f64; 4] = [10.0, 15.0, 20.0, 25.0];

impl Validate for EstimatorConfig {
    fn validate(&self) -> Result<()> {
        validate_positive("estimator.earth_radius_nm", self.earth_radius_nm)?;
        validate_positive("estimator.average_speed_knots", self.average_speed_knots)?;
        validate_non_negative("estimator.fuel_rate_per_nm", self.fuel_rate_per_nm)?;
        validate_non_negative("estimator.cost_rate_per_nm", self.cost_rate_per_nm)?;
        Ok(())
    }
}

/// Great-circle distance plus linear transit-time, fuel and cost estimates.
#[derive(Debug, Clone, Copy)]
pub struct RouteEstimator {
    config: EstimatorConfig,
}

impl Default for RouteEstimator {
    fn default() -> Self {
        Self {
            config: EstimatorConfig::default(),
        }
    }
}

impl RouteEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn distance_nm(&self, from: GeoCoordinate, to: GeoCoordinate) -> f64 {
        geo::great_circle_nm(from, to, self.config.earth_radius_nm)
    }

    /// Same as [`Self::distance_nm`] for raw degrees. NaN, infinite and
    /// out-of-range inputs are rejected instead of propagating into the result.
    pub fn distance_from_degrees(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64> {
        let from = GeoCoordinate::new(lat1, lon1)?;
        let to = GeoCoordinate::new(lat2, lon2)?;
        Ok(self.distance_nm(from, to))
    }

    pub fn eta(&self, distance_nm: f64) -> Eta {
        Eta::from_hours(distance_nm / self.config.average_speed_knots)
    }

    pub fn fuel_tons(&self, distance_nm: f64) -> f64 {
        distance_nm * self.config.fuel_rate_per_nm
    }

    pub fn cost(&self, distance_nm: f64) -> f64 {
        distance_nm * self.config.cost_rate_per_nm
    }

    pub fn alternative_etas(&self, distance_nm: f64) -> Vec<SpeedEta> {
        ALTERNATIVE_SPEEDS_KNOTS
            .iter()
            .filter(|&&speed| speed != self.config.average_speed_knots)
            .map(|&speed| SpeedEta {
                speed_knots: speed,
                eta: Eta::from_hours(distance_nm / speed),
            })
            .collect()
    }

    pub fn estimate(&self, origin: &Port, destination: &Port) -> RouteEstimate {
        let distance_nm = self.distance_nm(origin.coordinate, destination.coordinate);
        tracing::debug!(
            origin = %origin.code,
            destination = %destination.code,
            distance_nm,
            "Estimated great-circle route"
        );

        RouteEstimate {
            origin: origin.code.clone(),
            destination: destination.code.clone(),
            distance_nm,
            distance_km: geo::nm_to_km(distance_nm),
            distance_mi: geo::nm_to_statute_miles(distance_nm),
            average_speed_knots: self.config.average_speed_knots,
            eta: self.eta(distance_nm),
            fuel_tons: self.fuel_tons(distance_nm),
            estimated_cost: self.cost(distance_nm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::VesselType;

    #[test]
    fn test_eta_for_1200_nm_at_12_knots() {
        let estimator = RouteEstimator::default();
        let eta = estimator.eta(1200.0);
        assert_eq!(eta.total_hours, 100.0);
        assert_eq!(eta.days, 4);
        assert_eq!(eta.hours, 4.0);
    }

    #[test]
    fn test_fuel_is_linear_in_distance() {
        let estimator = RouteEstimator::default();
        let x = 1234.5;
        assert!((estimator.fuel_tons(2.0 * x) - 2.0 * estimator.fuel_tons(x)).abs() < 1e-9);
        assert!((estimator.fuel_tons(1000.0) - 150.0).abs() < 1e-9);
        assert!((estimator.cost(1000.0) - 25_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_nan_degrees() {
        let estimator = RouteEstimator::default();
        assert!(estimator.distance_from_degrees(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(estimator.distance_from_degrees(0.0, 0.0, 1.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let zero_speed = EstimatorConfig {
            average_speed_knots: 0.0,
            ..EstimatorConfig::default()
        };
        assert!(RouteEstimator::new(zero_speed).is_err());

        let negative_rate = EstimatorConfig {
            fuel_rate_per_nm: -0.1,
            ..EstimatorConfig::default()
        };
        assert!(RouteEstimator::new(negative_rate).is_err());
    }

    #[test]
    fn test_alternative_etas_skip_configured_speed() {
        let config = EstimatorConfig::default().for_vessel(VesselType::Container);
        let estimator = RouteEstimator::new(config).unwrap();
        let speeds: Vec<f64> = estimator
            .alternative_etas(600.0)
            .iter()
            .map(|s| s.speed_knots)
            .collect();
        assert_eq!(speeds, vec![10.0, 15.0, 25.0]);
    }
}
