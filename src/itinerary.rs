//! Owner of the mutable stop list.
//!
//! All edits go through [`Itinerary`]. Every edit bumps a generation counter
//! so a recompute that was started against an older stop list cannot
//! overwrite newer state when it finishes late.

use tracing::{debug, info};

use crate::engine::{ItineraryEngine, Plan};
use crate::error::{PlannerError, Result};
use crate::model::{CongestionAnnotation, Coordinate, Stop};
use crate::share::SavedStop;
use crate::traits::{ForecastProvider, RouteProvider};

/// Snapshot of the stop list taken before a recompute.
#[derive(Debug, Clone)]
pub struct RecomputeTicket {
    pub generation: u64,
    pub stops: Vec<Stop>,
}

#[derive(Debug, Clone, Default)]
pub struct Itinerary {
    stops: Vec<Stop>,
    annotations: Vec<CongestionAnnotation>,
    generation: u64,
}

impl Itinerary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an itinerary from persisted stops; derived fields start empty.
    pub fn from_saved(saved: Vec<SavedStop>) -> Self {
        let mut itinerary = Self::new();
        itinerary.stops = saved.into_iter().map(SavedStop::into_stop).collect();
        itinerary
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn annotations(&self) -> &[CongestionAnnotation] {
        &self.annotations
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Appends a stop at the end of the trip.
    pub fn add(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        self.stops.push(Stop::new(name, coordinate));
        self.invalidate();
    }

    pub fn remove(&mut self, index: usize) -> Result<Stop> {
        if index >= self.stops.len() {
            return Err(PlannerError::InvalidInput(format!(
                "no stop at position {} (have {})",
                index,
                self.stops.len()
            )));
        }
        let mut removed = self.stops.remove(index);
        removed.clear_derived();
        self.invalidate();
        Ok(removed)
    }

    /// Moves the stop at `from` so it ends up at position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.stops.len();
        if from >= len || to >= len {
            return Err(PlannerError::InvalidInput(format!(
                "cannot move stop {} to {} in a list of {}",
                from, to, len
            )));
        }
        let moved = self.stops.remove(from);
        self.stops.insert(to, moved);
        self.invalidate();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.stops.clear();
        self.invalidate();
    }

    pub fn ticket(&self) -> RecomputeTicket {
        RecomputeTicket {
            generation: self.generation,
            stops: self.stops.clone(),
        }
    }

    /// Installs a plan computed for `generation`.
    ///
    /// Returns false and leaves the itinerary untouched when the stop list
    /// changed since the ticket was taken.
    pub fn apply(&mut self, generation: u64, plan: Plan) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding plan for an outdated stop list"
            );
            return false;
        }
        self.stops = plan.stops;
        self.annotations = plan.annotations;
        true
    }

    /// Recomputes against the current stop list and applies the result.
    ///
    /// On error (a route failure in particular) the itinerary keeps its
    /// previous arrival times and weather.
    pub fn refresh<R, W>(&mut self, engine: &ItineraryEngine, routes: &R, weather: &W) -> Result<Plan>
    where
        R: RouteProvider + ?Sized,
        W: ForecastProvider + Sync + ?Sized,
    {
        let ticket = self.ticket();
        let plan = engine.recompute(&ticket.stops, routes, weather)?;
        self.apply(ticket.generation, plan.clone());
        info!(generation = ticket.generation, stops = plan.stops.len(), "itinerary refreshed");
        Ok(plan)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.annotations.clear();
        for stop in &mut self.stops {
            stop.clear_derived();
        }
    }
}
