//! Planner configuration.
//!
//! Loaded from JSON; every field has a default so a config file only needs
//! the values it changes. Secrets can come from the environment instead.

use std::path::Path;

use serde::Deserialize;

use crate::engine::{EngineOptions, ItineraryEngine};
use crate::error::{PlannerError, Result};
use crate::mapbox::{MapboxClient, MapboxConfig};
use crate::openweather::{OpenWeatherClient, OpenWeatherConfig};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::stats::FuelProfile;
use crate::traits::RouteProvider;

pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Which routing backend the planner talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingBackend {
    #[default]
    Mapbox,
    Osrm,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub routing: RoutingBackend,
    pub mapbox: MapboxConfig,
    pub osrm: OsrmConfig,
    pub openweather: OpenWeatherConfig,
    pub engine: EngineOptions,
    pub fuel: FuelProfile,
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Fills API credentials from the environment when set there.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(MAPBOX_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.mapbox.access_token = token;
        }
        if let Some(key) = lookup(OPENWEATHER_KEY_ENV).filter(|v| !v.is_empty()) {
            self.openweather.api_key = key;
        }
        self
    }

    /// Builds the configured routing backend.
    pub fn route_provider(&self) -> Result<Box<dyn RouteProvider + Send + Sync>> {
        Ok(match self.routing {
            RoutingBackend::Mapbox => Box::new(MapboxClient::new(self.mapbox.clone())?),
            RoutingBackend::Osrm => Box::new(OsrmClient::new(self.osrm.clone())?),
        })
    }

    pub fn forecast_provider(&self) -> Result<OpenWeatherClient> {
        OpenWeatherClient::new(self.openweather.clone())
    }

    pub fn engine(&self) -> ItineraryEngine {
        ItineraryEngine::new(self.engine.clone())
    }

    pub fn validate(&self) -> Result<()> {
        let segment = &self.engine.segment;
        if segment.long_run_threshold <= segment.min_run_length {
            return Err(PlannerError::Config(format!(
                "long_run_threshold ({}) must exceed min_run_length ({})",
                segment.long_run_threshold, segment.min_run_length
            )));
        }
        for (name, timeout) in [
            ("mapbox", self.mapbox.timeout_secs),
            ("osrm", self.osrm.timeout_secs),
            ("openweather", self.openweather.timeout_secs),
        ] {
            if timeout == 0 {
                return Err(PlannerError::Config(format!("{} timeout must be positive", name)));
            }
        }
        Ok(())
    }
}
