use crate::core::estimator::RouteEstimator;
use crate::core::insights::{route_insights, RouteInsights};
use crate::core::registry::PortRegistry;
use crate::domain::model::{EstimatorConfig, RouteEstimate, SpeedEta, VesselType};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub origin_port_code: String,
    pub destination_port_code: String,
    /// Unknown names fall back to a general cargo vessel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_type: Option<String>,
}

impl RouteRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin_port_code: origin.into(),
            destination_port_code: destination.into(),
            vessel_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtaBreakdown {
    pub days: u64,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub origin_port_code: String,
    pub destination_port_code: String,
    pub distance_nautical_miles: f64,
    pub distance_kilometers: f64,
    pub eta_hours: f64,
    pub eta_days: f64,
    pub eta_breakdown: EtaBreakdown,
    pub average_speed_knots: f64,
    pub fuel_tons: f64,
    pub estimated_cost: f64,
}

impl From<&RouteEstimate> for RouteSummary {
    fn from(estimate: &RouteEstimate) -> Self {
        Self {
            origin_port_code: estimate.origin.clone(),
            destination_port_code: estimate.destination.clone(),
            distance_nautical_miles: estimate.distance_nm,
            distance_kilometers: estimate.distance_km,
            eta_hours: estimate.eta.total_hours,
            eta_days: estimate.eta.total_days(),
            eta_breakdown: EtaBreakdown {
                days: estimate.eta.days,
                hours: estimate.eta.hours,
            },
            average_speed_knots: estimate.average_speed_knots,
            fuel_tons: estimate.fuel_tons,
            estimated_cost: estimate.estimated_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Either a route summary or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteResponse {
    Estimate(RouteSummary),
    Error(ErrorBody),
}

impl RouteResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, RouteResponse::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyagePlan {
    pub origin_name: String,
    pub destination_name: String,
    pub vessel_type: Option<VesselType>,
    pub estimate: RouteEstimate,
    pub alternative_speeds: Vec<SpeedEta>,
    pub insights: RouteInsights,
}

/// Port-code level entry point to the estimator.
#[derive(Debug, Clone)]
pub struct RouteService {
    registry: Arc<PortRegistry>,
    config: EstimatorConfig,
}

impl RouteService {
    pub fn new(registry: Arc<PortRegistry>, config: EstimatorConfig) -> Result<Self> {
        // reject a bad config at startup
        RouteEstimator::new(config)?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &PortRegistry {
        &self.registry
    }

    fn estimator_for(&self, vessel: Option<VesselType>) -> Result<RouteEstimator> {
        match vessel {
            Some(vessel) => RouteEstimator::new(self.config.for_vessel(vessel)),
            None => RouteEstimator::new(self.config),
        }
    }

    pub fn estimate(
        &self,
        origin_code: &str,
        destination_code: &str,
        vessel: Option<VesselType>,
    ) -> Result<RouteEstimate> {
        let origin = self.registry.get(origin_code)?;
        let destination = self.registry.get(destination_code)?;
        Ok(self.estimator_for(vessel)?.estimate(origin, destination))
    }

    /// Estimate plus alternative speeds and route insights. Ports may be given
    /// by code or name.
    pub fn plan(
        &self,
        origin: &str,
        destination: &str,
        vessel: Option<VesselType>,
    ) -> Result<VoyagePlan> {
        let origin = self.registry.resolve(origin)?;
        let destination = self.registry.resolve(destination)?;
        let estimator = self.estimator_for(vessel)?;
        let estimate = estimator.estimate(origin, destination);

        Ok(VoyagePlan {
            origin_name: origin.name.clone(),
            destination_name: destination.name.clone(),
            vessel_type: vessel,
            alternative_speeds: estimator.alternative_etas(estimate.distance_nm),
            insights: route_insights(origin, destination, estimate.distance_nm),
            estimate,
        })
    }

    /// Never fails: lookup and validation errors become the error variant.
    pub fn handle(&self, request: &RouteRequest) -> RouteResponse {
        let vessel = request
            .vessel_type
            .as_deref()
            .map(VesselType::from_name_or_default);

        match self.estimate(
            &request.origin_port_code,
            &request.destination_port_code,
            vessel,
        ) {
            Ok(estimate) => RouteResponse::Estimate(RouteSummary::from(&estimate)),
            Err(e) => {
                tracing::warn!(
                    origin = %request.origin_port_code,
                    destination = %request.destination_port_code,
                    "Route request rejected: {}",
                    e
                );
                RouteResponse::Error(ErrorBody {
                    error: e.user_friendly_message(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> RouteService {
        RouteService::new(Arc::new(PortRegistry::builtin()), EstimatorConfig::default()).unwrap()
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"originPortCode": "SGSIN", "destinationPortCode": "NLRTM"}"#,
        )
        .unwrap();
        assert_eq!(request, RouteRequest::new("SGSIN", "NLRTM"));
    }

    #[test]
    fn test_handle_unknown_origin_and_destination() {
        let service = service();
        for request in [
            RouteRequest::new("XXXXX", "NLRTM"),
            RouteRequest::new("SGSIN", "XXXXX"),
        ] {
            let response = service.handle(&request);
            assert!(response.is_error());
            let json = serde_json::to_value(&response).unwrap();
            assert!(json["error"].as_str().unwrap().contains("XXXXX"));
            assert!(json.get("distanceNauticalMiles").is_none());
        }
    }

    #[test]
    fn test_handle_serializes_contract_fields() {
        let response = service().handle(&RouteRequest::new("SGSIN", "CNSHA"));
        let json = serde_json::to_value(&response).unwrap();
        for field in [
            "distanceNauticalMiles",
            "distanceKilometers",
            "etaHours",
            "etaDays",
            "fuelTons",
            "estimatedCost",
        ] {
            let value = json[field].as_f64().unwrap();
            assert!(value.is_finite() && value > 0.0, "{} = {}", field, value);
        }
    }

    #[test]
    fn test_vessel_type_changes_speed() {
        let service = service();
        let mut request = RouteRequest::new("SGSIN", "NLRTM");
        request.vessel_type = Some("container".to_string());

        match service.handle(&request) {
            RouteResponse::Estimate(summary) => assert_eq!(summary.average_speed_knots, 20.0),
            RouteResponse::Error(e) => panic!("unexpected error: {}", e.error),
        }

        request.vessel_type = Some("hovercraft".to_string());
        match service.handle(&request) {
            RouteResponse::Estimate(summary) => assert_eq!(summary.average_speed_knots, 12.0),
            RouteResponse::Error(e) => panic!("unexpected error: {}", e.error),
        }
    }

    #[test]
    fn test_plan_resolves_names() {
        let plan = service()
            .plan("Singapore", "rotterdam", Some(VesselType::Bulk))
            .unwrap();
        assert_eq!(plan.estimate.origin, "SGSIN");
        assert_eq!(plan.estimate.destination, "NLRTM");
        assert_eq!(plan.alternative_speeds.len(), 4);
    }
}
