//! Straight-line journey estimates.
//!
//! A stand-in for a routing provider: leg distance is the great-circle distance
//! between consecutive stops, and leg duration assumes a constant average speed.
//! Addresses are geocoded from a fixed lookup table.

use crate::model::{Location, Route, RouteLeg, RouteSummary};
use crate::ports::{JourneyCalculationService, PortError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Average urban driving speed, in meters per second (about 25 km/h).
pub const DEFAULT_SPEED_MPS: f64 = 7.0;

#[derive(Debug)]
pub struct StraightLineJourneyService {
    speed_mps: f64,
    gazetteer: RwLock<HashMap<String, Location>>,
}

impl Default for StraightLineJourneyService {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_MPS)
    }
}

impl StraightLineJourneyService {
    pub fn new(speed_mps: f64) -> Self {
        Self {
            speed_mps,
            gazetteer: RwLock::new(HashMap::new()),
        }
    }

    /// Make `text` resolvable by [`geocode_address`](JourneyCalculationService::geocode_address).
    pub fn register_address(&self, text: impl Into<String>, location: Location) {
        self.gazetteer
            .write()
            .insert(normalize(&text.into()), location);
    }

    fn leg(&self, from: &Location, to: &Location) -> RouteLeg {
        let meters = from.distance_meters(to);
        RouteLeg {
            distance_meters: meters.round() as u64,
            duration_seconds: (meters / self.speed_mps).round() as u64,
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl JourneyCalculationService for StraightLineJourneyService {
    #[instrument(skip(self, locations), fields(stops = locations.len()))]
    async fn calculate_route(&self, locations: &[Location]) -> Result<Route, PortError> {
        if locations.len() < 2 {
            return Err(PortError::Route(format!(
                "a route needs at least two stops, got {}",
                locations.len()
            )));
        }
        if self.speed_mps.is_nan() || self.speed_mps <= 0.0 {
            return Err(PortError::Route(format!("invalid speed {}", self.speed_mps)));
        }

        let legs: Vec<RouteLeg> = locations
            .windows(2)
            .map(|pair| self.leg(&pair[0], &pair[1]))
            .collect();
        let summary = RouteSummary {
            distance_meters: legs.iter().map(|leg| leg.distance_meters).sum(),
            duration_seconds: legs.iter().map(|leg| leg.duration_seconds).sum(),
            legs,
        };
        let blob = serde_json::to_string(locations)
            .map_err(|e| PortError::Route(e.to_string()))?;

        debug!(
            distance = summary.distance_meters,
            duration = summary.duration_seconds,
            "Route calculated"
        );
        Ok(Route { summary, blob })
    }

    async fn geocode_address(&self, text: &str) -> Result<Option<Location>, PortError> {
        let location = self.gazetteer.read().get(&normalize(text)).copied();
        debug!(text, found = location.is_some(), "Geocode");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_route_has_one_leg_per_hop() {
        let service = StraightLineJourneyService::new(10.0);
        let a = Location::new(0.0, 0.0);
        let b = Location::new(0.01, 0.0);
        let c = Location::new(0.02, 0.0);

        let route = service.calculate_route(&[a, b, c]).await.unwrap();

        assert_eq!(route.summary.legs.len(), 2);
        let first = &route.summary.legs[0];
        // 0.01 degrees of latitude is about 1112 m.
        assert!((first.distance_meters as i64 - 1112).abs() <= 1);
        assert_eq!(route.first_leg_seconds(), first.duration_seconds);
        assert_eq!(
            route.summary.distance_meters,
            route.summary.legs.iter().map(|l| l.distance_meters).sum::<u64>()
        );

        let waypoints: Vec<Location> = serde_json::from_str(&route.blob).unwrap();
        assert_eq!(waypoints, vec![a, b, c]);
    }

    #[tokio::test]
    async fn test_single_stop_is_an_error() {
        let service = StraightLineJourneyService::default();
        let err = service
            .calculate_route(&[Location::new(1.0, 1.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Route(_)));
    }

    #[tokio::test]
    async fn test_geocode_ignores_case_and_spacing() {
        let service = StraightLineJourneyService::default();
        let home = Location::new(51.5, -0.12);
        service.register_address("1 High Street,  London", home);

        assert_eq!(
            service.geocode_address("1 high street, london").await.unwrap(),
            Some(home)
        );
        assert_eq!(service.geocode_address("nowhere").await.unwrap(), None);
    }
}
