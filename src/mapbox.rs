//! Mapbox Directions adapter with per-point congestion annotations.

use serde::Deserialize;
use tracing::debug;

use crate::error::{PlannerError, Result};
use crate::model::{Coordinate, Route};
use crate::osrm::{coordinate_path, ensure_routable, fetch_directions};
use crate::traits::RouteProvider;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapboxConfig {
    pub base_url: String,
    /// `driving-traffic` is the only Mapbox profile that reports congestion.
    pub profile: String,
    pub access_token: String,
    pub timeout_secs: u64,
}

impl Default for MapboxConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com".to_string(),
            profile: "driving-traffic".to_string(),
            access_token: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapboxClient {
    config: MapboxConfig,
    client: reqwest::blocking::Client,
}

impl MapboxClient {
    pub fn new(config: MapboxConfig) -> Result<Self> {
        if config.access_token.is_empty() {
            return Err(PlannerError::Config("Mapbox access token is not set".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl RouteProvider for MapboxClient {
    fn route_for(&self, coordinates: &[Coordinate]) -> Result<Route> {
        ensure_routable(coordinates)?;

        let url = format!(
            "{}/directions/v5/mapbox/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coordinate_path(coordinates)
        );
        debug!(%url, stops = coordinates.len(), "requesting Mapbox directions");

        let request = self.client.get(url).query(&[
            ("geometries", "geojson"),
            ("overview", "full"),
            ("annotations", "congestion"),
            ("access_token", self.config.access_token.as_str()),
        ]);
        fetch_directions(request)
    }
}
