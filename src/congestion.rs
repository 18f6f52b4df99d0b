//! Congested run detection along route geometry.
//!
//! Walks the per-point congestion levels as a two-state automaton
//! (outside a run / inside a run). Each run that closes with a transition
//! back to free-flowing traffic and is longer than the minimum length yields
//! one or two label anchors.

use serde::Deserialize;
use tracing::debug;

use crate::model::{CongestionAnnotation, CongestionLevel, Coordinate, Severity};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Runs must be strictly longer than this many points to be labelled.
    pub min_run_length: usize,
    /// Runs at least this long get two anchors instead of one.
    pub long_run_threshold: usize,
    /// Whether a run still open at the last point is labelled.
    ///
    /// Off by default: only runs that observe an explicit transition back to
    /// free flow are labelled.
    pub close_trailing_run: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_run_length: 9,
            long_run_threshold: 40,
            close_trailing_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Outside,
    Inside { start: usize },
}

/// Detects congested runs and returns their label anchors in scan order.
///
/// `coordinates` and `congestion` are index aligned; trailing elements of the
/// longer sequence are ignored.
pub fn segment(
    coordinates: &[Coordinate],
    congestion: &[CongestionLevel],
    options: &SegmentOptions,
) -> Vec<CongestionAnnotation> {
    let limit = coordinates.len().min(congestion.len());
    let mut annotations = Vec::new();
    let mut state = RunState::Outside;

    for (index, level) in congestion[..limit].iter().enumerate() {
        state = match (state, level.is_congested()) {
            (RunState::Outside, true) => RunState::Inside { start: index },
            (RunState::Inside { start }, false) => {
                emit_run(start, index, coordinates, congestion, options, &mut annotations);
                RunState::Outside
            }
            (unchanged, _) => unchanged,
        };
    }

    if let RunState::Inside { start } = state {
        if options.close_trailing_run {
            emit_run(start, limit, coordinates, congestion, options, &mut annotations);
        } else {
            debug!(start, end = limit, "congested run reaches end of geometry, not labelled");
        }
    }

    annotations
}

/// Returns anchor indices for the run `[start, end)`, or nothing if the run is too short.
fn anchor_indices(start: usize, end: usize, options: &SegmentOptions) -> Vec<usize> {
    let length = end - start;
    if length <= options.min_run_length {
        return Vec::new();
    }
    if length < options.long_run_threshold {
        vec![(start + end) / 2]
    } else {
        vec![
            start + (length as f64 * 0.3).floor() as usize,
            start + (length as f64 * 0.7).floor() as usize,
        ]
    }
}

fn emit_run(
    start: usize,
    end: usize,
    coordinates: &[Coordinate],
    congestion: &[CongestionLevel],
    options: &SegmentOptions,
    annotations: &mut Vec<CongestionAnnotation>,
) {
    for index in anchor_indices(start, end, options) {
        let coordinate = coordinates[index];
        if coordinate.is_sentinel() {
            debug!(index, lon = coordinate.lon, lat = coordinate.lat, "dropping anchor on sentinel coordinate");
            continue;
        }
        annotations.push(CongestionAnnotation {
            coordinate,
            severity: Severity::from(congestion[index]),
            point_index: index,
        });
    }
}
