//! OSRM HTTP adapter for driving routes.
//!
//! The response types here also cover the Mapbox Directions API, which
//! answers in the same OSRM-compatible shape.

use serde::Deserialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::model::{CongestionLevel, Coordinate, Route, RouteLeg};
use crate::polyline::Polyline;
use crate::traits::RouteProvider;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for OsrmClient {
    fn route_for(&self, coordinates: &[Coordinate]) -> Result<Route> {
        ensure_routable(coordinates)?;

        let url = format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coordinate_path(coordinates)
        );
        debug!(%url, "requesting OSRM route");

        fetch_directions(self.client.get(url))
    }
}

/// Formats positions as the `lon,lat;lon,lat` path segment both APIs expect.
pub(crate) fn coordinate_path(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(|c| format!("{:.6},{:.6}", c.lon, c.lat))
        .collect::<Vec<_>>()
        .join(";")
}

pub(crate) fn ensure_routable(coordinates: &[Coordinate]) -> Result<()> {
    if coordinates.len() < 2 {
        return Err(PlannerError::InvalidInput(format!(
            "a route needs at least two positions, got {}",
            coordinates.len()
        )));
    }
    Ok(())
}

/// Sends a directions request and decodes the first route.
pub(crate) fn fetch_directions(request: reqwest::blocking::RequestBuilder) -> Result<Route> {
    let response = request
        .send()
        .map_err(|err| PlannerError::RouteUnavailable(format!("request failed: {}", err)))?;

    let status = response.status();
    let body = response
        .json::<DirectionsResponse>()
        .map_err(|err| PlannerError::RouteUnavailable(format!("HTTP {}: unreadable body: {}", status, err)))?;

    if !status.is_success() && body.code == "Ok" {
        return Err(PlannerError::RouteUnavailable(format!("HTTP {}", status)));
    }
    body.into_route()
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: LineString,
    legs: Vec<DirectionsLeg>,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: f64,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    annotation: Option<LegAnnotation>,
}

#[derive(Debug, Deserialize)]
struct LegAnnotation {
    #[serde(default)]
    congestion: Option<Vec<String>>,
}

impl DirectionsResponse {
    pub(crate) fn into_route(self) -> Result<Route> {
        if self.code != "Ok" {
            return Err(PlannerError::RouteUnavailable(match self.message {
                Some(message) => format!("{}: {}", self.code, message),
                None => self.code,
            }));
        }
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| PlannerError::RouteUnavailable("response holds no routes".to_string()))?;

        // Congestion is reported per leg; legs are concatenated in travel order.
        let has_congestion = route
            .legs
            .iter()
            .any(|leg| leg.annotation.as_ref().is_some_and(|a| a.congestion.is_some()));
        let congestion = has_congestion.then(|| {
            route
                .legs
                .iter()
                .filter_map(|leg| leg.annotation.as_ref()?.congestion.as_ref())
                .flatten()
                .map(|label| CongestionLevel::from_label(label))
                .collect()
        });

        Ok(Route {
            geometry: Polyline::from_lon_lat(&route.geometry.coordinates),
            legs: route
                .legs
                .iter()
                .map(|leg| RouteLeg {
                    duration_seconds: leg.duration,
                    distance_meters: leg.distance,
                })
                .collect(),
            congestion,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
