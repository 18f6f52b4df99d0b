//! Provider seams for the itinerary engine.
//!
//! Routing and weather data come from external services. The engine only
//! talks to these traits so tests and alternative backends can plug in.

use crate::error::Result;
use crate::model::{Coordinate, ForecastSample, Route};

/// Computes a drivable route through an ordered list of positions.
pub trait RouteProvider {
    /// Returns the route through `coordinates` (at least two) in the given order.
    ///
    /// Failures and non-success provider statuses surface as
    /// [`PlannerError::RouteUnavailable`](crate::error::PlannerError::RouteUnavailable).
    fn route_for(&self, coordinates: &[Coordinate]) -> Result<Route>;
}

/// Supplies a forecast time series for a position.
pub trait ForecastProvider {
    /// Returns the forecast samples for `coordinate`. An empty series is valid.
    fn forecast_for(&self, coordinate: Coordinate) -> Result<Vec<ForecastSample>>;
}
