//! City-centre coordinates for realistic itineraries.

use itinerary_planner::model::{Coordinate, Stop};

/// A named location, longitude first.
#[derive(Debug, Clone)]
pub struct City {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

impl City {
    pub const fn new(name: &'static str, lon: f64, lat: f64) -> Self {
        Self { name, lon, lat }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate { lon: self.lon, lat: self.lat }
    }

    pub fn stop(&self) -> Stop {
        Stop::new(self.name, self.coordinate())
    }
}

pub const WARSAW: City = City::new("Warszawa", 21.0, 52.2);
pub const KRAKOW: City = City::new("Kraków", 19.9, 50.0);
pub const LODZ: City = City::new("Łódź", 19.4560, 51.7592);
pub const GDANSK: City = City::new("Gdańsk", 18.6466, 54.3520);
pub const POZNAN: City = City::new("Poznań", 16.9252, 52.4064);
pub const WROCLAW: City = City::new("Wrocław", 17.0385, 51.1079);

pub fn stops(cities: &[City]) -> Vec<Stop> {
    cities.iter().map(City::stop).collect()
}
