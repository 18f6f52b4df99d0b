//! Itinerary engine: route, arrival times, weather and congestion labels.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::congestion::{self, SegmentOptions};
use crate::error::{PlannerError, Result};
use crate::eta;
use crate::forecast;
use crate::model::{CongestionAnnotation, CongestionPoint, Coordinate, ForecastSample, Route, Stop};
use crate::polyline::Polyline;
use crate::traits::{ForecastProvider, RouteProvider};

/// How per-stop forecasts are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastFetch {
    /// One stop at a time, in travel order.
    #[default]
    Sequential,
    /// All stops at once on the rayon pool. Arrival times are computed first.
    Parallel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub segment: SegmentOptions,
    pub forecast_fetch: ForecastFetch,
}

/// Route data handed to renderers and the statistics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub geometry: Polyline,
    pub congestion_points: Vec<CongestionPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            geometry: route.geometry.clone(),
            congestion_points: route.congestion_points(),
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
        }
    }
}

/// Result of a recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub stops: Vec<Stop>,
    pub annotations: Vec<CongestionAnnotation>,
    /// `None` when there are fewer than two stops: renderers clear the route,
    /// statistics and forecast chart.
    pub route: Option<RouteSummary>,
}

impl Plan {
    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItineraryEngine {
    options: EngineOptions,
}

impl ItineraryEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Re-derives the whole itinerary starting now.
    pub fn recompute<R, W>(&self, stops: &[Stop], routes: &R, weather: &W) -> Result<Plan>
    where
        R: RouteProvider + ?Sized,
        W: ForecastProvider + Sync + ?Sized,
    {
        self.recompute_at(stops, routes, weather, Utc::now())
    }

    /// Re-derives the whole itinerary with the first stop reached at `start`.
    ///
    /// The input stops are never modified. On error nothing is returned, so a
    /// failed route leaves the caller's state exactly as it was.
    pub fn recompute_at<R, W>(
        &self,
        stops: &[Stop],
        routes: &R,
        weather: &W,
        start: DateTime<Utc>,
    ) -> Result<Plan>
    where
        R: RouteProvider + ?Sized,
        W: ForecastProvider + Sync + ?Sized,
    {
        if stops.len() < 2 {
            debug!(stops = stops.len(), "not enough stops for a route");
            return Ok(Plan {
                stops: stops.to_vec(),
                annotations: Vec::new(),
                route: None,
            });
        }

        let coordinates: Vec<Coordinate> = stops.iter().map(|stop| stop.coordinate).collect();
        let route = routes.route_for(&coordinates).map_err(|err| {
            warn!(error = %err, stops = stops.len(), "route request failed");
            match err {
                PlannerError::RouteUnavailable(_) => err,
                other => PlannerError::RouteUnavailable(other.to_string()),
            }
        })?;

        let arrivals = eta::propagate(stops, &route.leg_durations(), start)?;
        let forecasts = self.fetch_forecasts(stops, &arrivals, weather);

        let planned = stops
            .iter()
            .zip(arrivals)
            .zip(forecasts)
            .map(|((stop, arrival), sample)| Stop {
                arrival_time: Some(arrival),
                weather: sample,
                ..stop.clone()
            })
            .collect::<Vec<_>>();

        let annotations = match &route.congestion {
            Some(levels) => congestion::segment(route.geometry.points(), levels, &self.options.segment),
            None => Vec::new(),
        };

        info!(
            stops = planned.len(),
            annotations = annotations.len(),
            distance_meters = route.distance_meters,
            "itinerary recomputed"
        );

        Ok(Plan {
            stops: planned,
            annotations,
            route: Some(RouteSummary::from(&route)),
        })
    }

    fn fetch_forecasts<W>(
        &self,
        stops: &[Stop],
        arrivals: &[DateTime<Utc>],
        weather: &W,
    ) -> Vec<Option<ForecastSample>>
    where
        W: ForecastProvider + Sync + ?Sized,
    {
        match self.options.forecast_fetch {
            ForecastFetch::Sequential => stops
                .iter()
                .zip(arrivals)
                .map(|(stop, arrival)| forecast_at(weather, stop, *arrival))
                .collect(),
            ForecastFetch::Parallel => stops
                .par_iter()
                .zip(arrivals.par_iter())
                .map(|(stop, arrival)| forecast_at(weather, stop, *arrival))
                .collect(),
        }
    }
}

/// Fetches the series for one stop and picks the sample closest to its arrival.
/// Failures only cost this stop its weather.
fn forecast_at<W: ForecastProvider + ?Sized>(
    weather: &W,
    stop: &Stop,
    arrival: DateTime<Utc>,
) -> Option<ForecastSample> {
    match weather.forecast_for(stop.coordinate) {
        Ok(samples) => {
            let sample = forecast::closest(&samples, arrival).cloned();
            if sample.is_none() {
                debug!(stop = %stop.name, "forecast series is empty");
            }
            sample
        }
        Err(err) => {
            warn!(stop = %stop.name, error = %err, "forecast unavailable");
            None
        }
    }
}
