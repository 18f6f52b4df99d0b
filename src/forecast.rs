//! Nearest-forecast lookup.

use chrono::{DateTime, Utc};

use crate::model::ForecastSample;

/// Returns the sample whose timestamp is closest to `target`.
///
/// The series does not need to be sorted. On an exact tie the earliest
/// indexed sample wins. Returns `None` for an empty series, which callers
/// treat as "no forecast available".
pub fn closest(samples: &[ForecastSample], target: DateTime<Utc>) -> Option<&ForecastSample> {
    let mut best: Option<(&ForecastSample, i64)> = None;

    for sample in samples {
        let diff = sample
            .timestamp
            .signed_duration_since(target)
            .num_milliseconds()
            .abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((sample, diff)),
        }
    }

    best.map(|(sample, _)| sample)
}
