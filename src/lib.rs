//! itinerary-planner core
//!
//! Plans a multi-stop drive: arrival times per stop, the forecast closest to
//! each arrival, and label anchors for congested stretches of the route.

pub mod config;
pub mod congestion;
pub mod engine;
pub mod error;
pub mod eta;
pub mod forecast;
pub mod itinerary;
pub mod mapbox;
pub mod model;
pub mod openweather;
pub mod osrm;
pub mod polyline;
pub mod share;
pub mod stats;
pub mod traits;

pub use engine::{ItineraryEngine, Plan};
pub use error::{PlannerError, Result};
pub use itinerary::Itinerary;
