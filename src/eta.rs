//! Sequential arrival-time propagation across route legs.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{PlannerError, Result};

/// Computes an arrival time for every stop by accumulating leg durations from `start`.
///
/// `leg_durations_seconds` must hold exactly one entry fewer than `stops`;
/// each duration must be finite and non-negative. The first stop arrives at
/// `start`.
pub fn propagate<T>(
    stops: &[T],
    leg_durations_seconds: &[f64],
    start: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>> {
    if stops.is_empty() {
        return Err(PlannerError::InvalidInput(
            "cannot propagate arrival times without stops".to_string(),
        ));
    }
    if leg_durations_seconds.len() != stops.len() - 1 {
        return Err(PlannerError::InvalidInput(format!(
            "expected {} leg durations for {} stops, got {}",
            stops.len() - 1,
            stops.len(),
            leg_durations_seconds.len()
        )));
    }
    if let Some(bad) = leg_durations_seconds
        .iter()
        .find(|seconds| !seconds.is_finite() || **seconds < 0.0)
    {
        return Err(PlannerError::InvalidInput(format!(
            "leg duration must be a non-negative number of seconds, got {}",
            bad
        )));
    }

    let mut arrivals = Vec::with_capacity(stops.len());
    arrivals.push(start);

    // Offsets are accumulated in floating point and rounded once per stop so
    // that millisecond rounding does not drift along long itineraries.
    let mut elapsed = 0.0;
    for seconds in leg_durations_seconds {
        elapsed += seconds;
        arrivals.push(offset_by(start, elapsed)?);
    }

    Ok(arrivals)
}

/// Adds `elapsed` seconds to `start`, failing instead of leaving chrono's range.
fn offset_by(start: DateTime<Utc>, elapsed: f64) -> Result<DateTime<Utc>> {
    let millis = (elapsed * 1000.0).round();
    let out_of_range = || {
        PlannerError::InvalidInput(format!(
            "arrival {} seconds after {} is outside the representable range",
            elapsed, start
        ))
    };
    // i64::MAX as f64 rounds up to 2^63, so the bound is exclusive.
    if millis >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    let delta = TimeDelta::try_milliseconds(millis as i64).ok_or_else(out_of_range)?;
    start.checked_add_signed(delta).ok_or_else(out_of_range)
}
