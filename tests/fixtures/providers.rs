//! In-memory route and forecast providers.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};

use itinerary_planner::error::{PlannerError, Result};
use itinerary_planner::model::{CongestionLevel, Coordinate, ForecastSample, Route, RouteLeg};
use itinerary_planner::polyline::Polyline;
use itinerary_planner::traits::{ForecastProvider, RouteProvider};

/// Returns a route whose geometry is the stop positions themselves.
pub struct MockRoute {
    pub leg_seconds: Option<Vec<f64>>,
    pub geometry: Option<Vec<Coordinate>>,
    pub congestion: Option<Vec<CongestionLevel>>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl MockRoute {
    /// Every leg takes one hour.
    pub fn hourly() -> Self {
        Self {
            leg_seconds: None,
            geometry: None,
            congestion: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::hourly()
        }
    }

    pub fn legs(mut self, seconds: &[f64]) -> Self {
        self.leg_seconds = Some(seconds.to_vec());
        self
    }

    pub fn geometry(mut self, points: Vec<Coordinate>, congestion: Vec<CongestionLevel>) -> Self {
        self.geometry = Some(points);
        self.congestion = Some(congestion);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteProvider for MockRoute {
    fn route_for(&self, coordinates: &[Coordinate]) -> Result<Route> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PlannerError::RouteUnavailable("HTTP 503 Service Unavailable".to_string()));
        }

        let leg_seconds = self
            .leg_seconds
            .clone()
            .unwrap_or_else(|| vec![3600.0; coordinates.len().saturating_sub(1)]);
        let legs: Vec<RouteLeg> = leg_seconds
            .iter()
            .map(|seconds| RouteLeg {
                duration_seconds: *seconds,
                distance_meters: seconds * 25.0,
            })
            .collect();

        Ok(Route {
            geometry: Polyline::new(self.geometry.clone().unwrap_or_else(|| coordinates.to_vec())),
            distance_meters: legs.iter().map(|leg| leg.distance_meters).sum(),
            duration_seconds: leg_seconds.iter().sum(),
            legs,
            congestion: self.congestion.clone(),
        })
    }
}

/// Three-hourly forecasts starting at `from`. Temperatures rise one degree per
/// sample so tests can tell which sample was picked.
pub struct MockWeather {
    pub from: DateTime<Utc>,
    pub failing: Vec<Coordinate>,
    pub empty: Vec<Coordinate>,
    pub requested: Mutex<Vec<Coordinate>>,
}

impl MockWeather {
    pub fn starting(from: DateTime<Utc>) -> Self {
        Self {
            from,
            failing: Vec::new(),
            empty: Vec::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, coordinate: Coordinate) -> Self {
        self.failing.push(coordinate);
        self
    }

    pub fn empty_at(mut self, coordinate: Coordinate) -> Self {
        self.empty.push(coordinate);
        self
    }

    pub fn requested(&self) -> Vec<Coordinate> {
        self.requested.lock().unwrap().clone()
    }
}

impl ForecastProvider for MockWeather {
    fn forecast_for(&self, coordinate: Coordinate) -> Result<Vec<ForecastSample>> {
        self.requested.lock().unwrap().push(coordinate);
        if self.failing.contains(&coordinate) {
            return Err(PlannerError::ForecastUnavailable("HTTP 401 Unauthorized".to_string()));
        }
        if self.empty.contains(&coordinate) {
            return Ok(Vec::new());
        }
        Ok((0..40)
            .map(|i| ForecastSample {
                timestamp: self.from + Duration::hours(3 * i),
                temperature_celsius: i as f64,
                precipitation_probability: (i % 10) as f64 / 10.0,
            })
            .collect())
    }
}
