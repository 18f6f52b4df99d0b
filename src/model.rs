//! Itinerary data model.
//!
//! Everything here is plain, ownership-free data. Map markers and other view
//! handles belong to the renderer and are never stored on a [`Stop`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::polyline::Polyline;

/// A geographic position in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lon: f64, lat: f64) -> Result<Self> {
        let valid = lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat);
        if valid {
            Ok(Self { lon, lat })
        } else {
            Err(PlannerError::InvalidCoordinate { lon, lat })
        }
    }

    /// True for placeholder points emitted by routing providers.
    ///
    /// A point is a sentinel when either component is NaN, when both round to
    /// zero, or when both lie within 0.1 degrees of zero.
    pub fn is_sentinel(&self) -> bool {
        if self.lon.is_nan() || self.lat.is_nan() {
            return true;
        }
        if rounds_to_zero(self.lon) && rounds_to_zero(self.lat) {
            return true;
        }
        self.lon.abs() < 0.1 && self.lat.abs() < 0.1
    }
}

/// Half-up rounding: -0.5 rounds to zero, 0.5 does not.
fn rounds_to_zero(value: f64) -> bool {
    (value + 0.5).floor() == 0.0
}

/// A waypoint in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub coordinate: Coordinate,
    /// Set by the engine; `None` until the itinerary has been computed.
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub weather: Option<ForecastSample>,
}

impl Stop {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            arrival_time: None,
            weather: None,
        }
    }

    /// Drops everything derived by a recompute.
    pub fn clear_derived(&mut self) {
        self.arrival_time = None;
        self.weather = None;
    }
}

/// One hop between two consecutive stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub duration_seconds: f64,
    #[serde(default)]
    pub distance_meters: f64,
}

/// A single forecast observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: f64,
    /// Probability of precipitation in [0, 1].
    pub precipitation_probability: f64,
}

/// Traffic density attached to a point of the route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Free,
    Low,
    Moderate,
    Heavy,
    Severe,
}

impl CongestionLevel {
    /// Parses a provider label. `unknown` and unrecognised labels count as free flow.
    pub fn from_label(label: &str) -> Self {
        match label {
            "low" => Self::Low,
            "moderate" => Self::Moderate,
            "heavy" => Self::Heavy,
            "severe" => Self::Severe,
            _ => Self::Free,
        }
    }

    /// Only heavy and severe traffic takes part in run clustering.
    pub fn is_congested(self) -> bool {
        matches!(self, Self::Heavy | Self::Severe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CongestionPoint {
    pub coordinate: Coordinate,
    pub level: CongestionLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Heavy,
    Severe,
}

impl From<CongestionLevel> for Severity {
    fn from(level: CongestionLevel) -> Self {
        match level {
            CongestionLevel::Severe => Severity::Severe,
            _ => Severity::Heavy,
        }
    }
}

/// A label anchor for a congested run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CongestionAnnotation {
    pub coordinate: Coordinate,
    pub severity: Severity,
    /// Index of the anchor within the route geometry.
    pub point_index: usize,
}

/// A drivable route as returned by a routing provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: Polyline,
    pub legs: Vec<RouteLeg>,
    /// Per-point congestion, index-aligned with `geometry` when present.
    pub congestion: Option<Vec<CongestionLevel>>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl Route {
    pub fn leg_durations(&self) -> Vec<f64> {
        self.legs.iter().map(|leg| leg.duration_seconds).collect()
    }

    /// Pairs geometry points with their congestion level, truncated to the shorter sequence.
    pub fn congestion_points(&self) -> Vec<CongestionPoint> {
        let Some(levels) = &self.congestion else {
            return Vec::new();
        };
        self.geometry
            .points()
            .iter()
            .zip(levels)
            .map(|(coordinate, level)| CongestionPoint {
                coordinate: *coordinate,
                level: *level,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_rejects_out_of_range() {
        assert!(Coordinate::new(181.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -90.5).is_err());
        assert!(Coordinate::new(f64::NAN, 10.0).is_err());
        assert!(Coordinate::new(21.0, 52.2).is_ok());
    }

    #[test]
    fn sentinel_detection() {
        assert!(Coordinate { lon: 0.0, lat: 0.0 }.is_sentinel());
        assert!(Coordinate { lon: 0.4, lat: -0.3 }.is_sentinel());
        assert!(Coordinate { lon: f64::NAN, lat: 50.0 }.is_sentinel());
        assert!(!Coordinate { lon: 19.9, lat: 50.0 }.is_sentinel());
        // Only one component near zero: a real place on the prime meridian.
        assert!(!Coordinate { lon: 0.05, lat: 51.5 }.is_sentinel());
    }

    #[test]
    fn sentinel_rounding_is_half_up() {
        assert!(Coordinate { lon: -0.5, lat: 0.3 }.is_sentinel());
        assert!(Coordinate { lon: 0.2, lat: -0.5 }.is_sentinel());
        assert!(!Coordinate { lon: 0.5, lat: 0.3 }.is_sentinel());
        assert!(!Coordinate { lon: -0.51, lat: 0.3 }.is_sentinel());
    }

    #[test]
    fn congestion_labels() {
        assert_eq!(CongestionLevel::from_label("severe"), CongestionLevel::Severe);
        assert_eq!(CongestionLevel::from_label("unknown"), CongestionLevel::Free);
        assert!(CongestionLevel::Heavy.is_congested());
        assert!(!CongestionLevel::Moderate.is_congested());
        assert!(CongestionLevel::Low < CongestionLevel::Severe);
    }

    #[test]
    fn severity_defaults_to_heavy() {
        assert_eq!(Severity::from(CongestionLevel::Severe), Severity::Severe);
        assert_eq!(Severity::from(CongestionLevel::Heavy), Severity::Heavy);
        assert_eq!(Severity::from(CongestionLevel::Free), Severity::Heavy);
    }

    #[test]
    fn congestion_points_truncate_to_shorter() {
        let route = Route {
            geometry: Polyline::new(vec![
                Coordinate { lon: 1.0, lat: 1.0 },
                Coordinate { lon: 2.0, lat: 2.0 },
                Coordinate { lon: 3.0, lat: 3.0 },
            ]),
            legs: Vec::new(),
            congestion: Some(vec![CongestionLevel::Heavy, CongestionLevel::Low]),
            distance_meters: 0.0,
            duration_seconds: 0.0,
        };
        let points = route.congestion_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].level, CongestionLevel::Low);
    }

    #[test]
    fn stop_serializes_without_derived_fields_set() {
        let stop = Stop::new("Warsaw", Coordinate { lon: 21.0, lat: 52.2 });
        let json = serde_json::to_string(&stop).unwrap();
        let back: Stop = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stop);
        assert!(back.arrival_time.is_none());
    }
}
