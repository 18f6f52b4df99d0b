//! Polyline representation for route geometries.
//!
//! Providers hand geometry over as GeoJSON coordinate arrays; adapters decode
//! them into a [`Polyline`] at the boundary so the core only sees positions.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// A route geometry as an ordered sequence of positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON `[lon, lat]` pairs.
    pub fn from_lon_lat(pairs: &[[f64; 2]]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|[lon, lat]| Coordinate { lon: *lon, lat: *lat })
                .collect(),
        }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// An empty polyline is the renderer's signal to clear the route layer.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lon_lat_keeps_order() {
        let polyline = Polyline::from_lon_lat(&[[21.0, 52.2], [19.9, 50.0]]);
        assert_eq!(polyline.len(), 2);
        assert_eq!(
            polyline.points(),
            &[Coordinate { lon: 21.0, lat: 52.2 }, Coordinate { lon: 19.9, lat: 50.0 }]
        );
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::default();
        assert!(polyline.is_empty());
        assert!(polyline.points().is_empty());
    }
}
