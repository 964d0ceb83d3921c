use crate::core::estimator::RouteEstimator;
use crate::domain::model::{EstimatorConfig, FuelType, VesselType};
use crate::utils::error::{MaritimeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionEstimate {
    pub distance_nm: f64,
    pub days_at_sea: f64,
    pub fuel_tons: f64,
    pub co2_kg: f64,
    pub co2_tons: f64,
    pub fuel: FuelType,
    pub vessel_type: VesselType,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MaritimeError::validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// kg of CO2 from burning `fuel_tons` of the given fuel.
pub fn co2_for_fuel(fuel_tons: f64, fuel: FuelType) -> f64 {
    fuel_tons * fuel.emission_factor_kg_per_ton()
}

/// Days at sea for `distance_nm` at the vessel's service speed, using the
/// remaining estimator constants from `config`.
pub fn days_at_sea(config: EstimatorConfig, distance_nm: f64, vessel_type: VesselType) -> Result<f64> {
    non_negative("distance_nm", distance_nm)?;
    let estimator = RouteEstimator::new(config.for_vessel(vessel_type))?;
    Ok(estimator.eta(distance_nm).total_days())
}

/// Time-at-sea emission model: daily consumption by vessel type times the
/// fuel's emission factor.
pub fn estimate_emissions(
    distance_nm: f64,
    days_at_sea: f64,
    fuel: FuelType,
    vessel_type: VesselType,
) -> Result<EmissionEstimate> {
    non_negative("distance_nm", distance_nm)?;
    non_negative("days_at_sea", days_at_sea)?;

    let fuel_tons = vessel_type.daily_fuel_consumption_tons() * days_at_sea;
    let co2_kg = co2_for_fuel(fuel_tons, fuel);

    Ok(EmissionEstimate {
        distance_nm,
        days_at_sea,
        fuel_tons: round2(fuel_tons),
        co2_kg: round2(co2_kg),
        co2_tons: round2(co2_kg / 1000.0),
        fuel,
        vessel_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_vessel_on_vlsfo() {
        let estimate =
            estimate_emissions(1200.0, 4.0, FuelType::Vlsfo, VesselType::General).unwrap();
        assert_eq!(estimate.fuel_tons, 120.0);
        assert_eq!(estimate.co2_kg, 373_680.0);
        assert_eq!(estimate.co2_tons, 373.68);
    }

    #[test]
    fn test_days_at_sea_from_configured_constants() {
        let config = EstimatorConfig {
            average_speed_knots: 30.0,
            cost_rate_per_nm: 40.0,
            ..EstimatorConfig::default()
        };
        // bulk carriers sail at 12 kn regardless of the configured default speed
        assert_eq!(days_at_sea(config, 288.0, VesselType::Bulk).unwrap(), 1.0);
        assert_eq!(days_at_sea(config, 480.0, VesselType::Container).unwrap(), 1.0);

        let broken = EstimatorConfig {
            earth_radius_nm: -1.0,
            ..EstimatorConfig::default()
        };
        assert!(days_at_sea(broken, 288.0, VesselType::Bulk).is_err());
        assert!(days_at_sea(config, -5.0, VesselType::Bulk).is_err());
    }

    #[test]
    fn test_lng_burns_cleaner_than_mgo() {
        let lng = estimate_emissions(0.0, 10.0, FuelType::Lng, VesselType::Lng).unwrap();
        let mgo = estimate_emissions(0.0, 10.0, FuelType::Mgo, VesselType::Lng).unwrap();
        assert_eq!(lng.fuel_tons, mgo.fuel_tons);
        assert!(lng.co2_kg < mgo.co2_kg);
    }

    #[test]
    fn test_rejects_negative_and_nan() {
        assert!(estimate_emissions(-1.0, 1.0, FuelType::Hfo, VesselType::Bulk).is_err());
        assert!(estimate_emissions(1.0, f64::NAN, FuelType::Hfo, VesselType::Bulk).is_err());
    }

    #[test]
    fn test_co2_for_fuel_is_linear() {
        assert_eq!(co2_for_fuel(2.0, FuelType::Hfo), 2.0 * co2_for_fuel(1.0, FuelType::Hfo));
    }
}
