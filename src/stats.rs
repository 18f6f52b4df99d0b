//! Trip statistics and per-stop weather series for the dashboard.

use serde::{Deserialize, Serialize};

use crate::engine::RouteSummary;
use crate::model::Stop;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FuelProfile {
    pub consumption_l_per_100km: f64,
    pub price_per_litre: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TripStats {
    pub distance_km: f64,
    pub duration_hours: f64,
    pub fuel_litres: f64,
    pub cost: f64,
}

impl TripStats {
    /// All zeros when there is no route, i.e. a cleared dashboard.
    pub fn from_route(route: Option<&RouteSummary>, fuel: &FuelProfile) -> Self {
        let Some(route) = route else {
            return Self::default();
        };

        let distance_km = route.distance_meters / 1000.0;
        let fuel_litres = distance_km / 100.0 * non_negative(fuel.consumption_l_per_100km);
        Self {
            distance_km,
            duration_hours: route.duration_seconds / 3600.0,
            fuel_litres,
            cost: fuel_litres * non_negative(fuel.price_per_litre),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Chart data: temperature and rain chance at each stop's arrival.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeatherSeries {
    pub labels: Vec<String>,
    /// Rounded °C, `None` where the stop has no forecast.
    pub temperatures: Vec<Option<i64>>,
    /// Rounded percent, 0 where the stop has no forecast.
    pub rain_percent: Vec<i64>,
}

impl WeatherSeries {
    pub fn from_stops(stops: &[Stop]) -> Self {
        let mut series = Self::default();
        for stop in stops {
            series.labels.push(stop.name.clone());
            series
                .temperatures
                .push(stop.weather.as_ref().map(|w| w.temperature_celsius.round() as i64));
            series.rain_percent.push(
                stop.weather
                    .as_ref()
                    .map(|w| (w.precipitation_probability * 100.0).round() as i64)
                    .unwrap_or(0),
            );
        }
        series
    }
}
