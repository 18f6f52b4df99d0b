//! Test fixtures for itinerary-planner.
//!
//! Provides real Polish city coordinates and in-memory providers.

#![allow(dead_code)]

pub mod polish_cities;
pub mod providers;

pub use polish_cities::*;
pub use providers::*;
