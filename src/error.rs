//! Error taxonomy for the itinerary planner.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Malformed arguments, e.g. a leg count that does not match the stop count.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The routing provider failed or answered with a non-success status.
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),
    /// A single stop's forecast could not be fetched. Never fatal for a recompute.
    #[error("forecast unavailable: {0}")]
    ForecastUnavailable(String),
    #[error("invalid coordinate ({lon}, {lat})")]
    InvalidCoordinate { lon: f64, lat: f64 },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
