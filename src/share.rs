//! Saving and sharing stop lists.
//!
//! Only the name and position of each stop are persisted. Arrival times and
//! weather are derived and get recomputed after loading.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::model::{Coordinate, Stop};

const ROUTE_PARAM: &str = "route=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedStop {
    pub name: String,
    pub coordinate: Coordinate,
}

impl SavedStop {
    pub fn into_stop(self) -> Stop {
        Stop::new(self.name, self.coordinate)
    }
}

impl From<&Stop> for SavedStop {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            coordinate: stop.coordinate,
        }
    }
}

pub fn save_json(stops: &[Stop]) -> Result<String> {
    let saved: Vec<SavedStop> = stops.iter().map(SavedStop::from).collect();
    Ok(serde_json::to_string(&saved)?)
}

/// Loads a saved stop list. An empty list counts as nothing saved.
pub fn load_json(json: &str) -> Result<Vec<SavedStop>> {
    let saved: Vec<SavedStop> = serde_json::from_str(json)
        .map_err(|err| PlannerError::InvalidInput(format!("saved stops are unreadable: {}", err)))?;
    if saved.is_empty() {
        return Err(PlannerError::InvalidInput("saved stop list is empty".to_string()));
    }
    Ok(saved)
}

/// Encodes the stops as a `route=` query for share links.
///
/// Each stop becomes `name,lon,lat` with a percent-encoded name and four
/// decimal places; stops are joined with `;`. Returns `None` for fewer than
/// two stops since there is no route to share.
pub fn share_query(stops: &[Stop]) -> Option<String> {
    if stops.len() < 2 {
        return None;
    }
    let segments = stops
        .iter()
        .map(|stop| {
            format!(
                "{},{:.4},{:.4}",
                urlencoding::encode(&stop.name),
                stop.coordinate.lon,
                stop.coordinate.lat
            )
        })
        .collect::<Vec<_>>()
        .join(";");
    Some(format!("{}{}", ROUTE_PARAM, segments))
}

/// Parses a query produced by [`share_query`]. A leading `?` is accepted.
pub fn parse_share_query(query: &str) -> Result<Vec<SavedStop>> {
    let query = query.trim_start_matches('?');
    let value = query
        .split('&')
        .find_map(|pair| pair.strip_prefix(ROUTE_PARAM))
        .ok_or_else(|| PlannerError::InvalidInput("share link has no route parameter".to_string()))?;

    value.split(';').map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Result<SavedStop> {
    let mut parts = segment.split(',');
    let (Some(name), Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(PlannerError::InvalidInput(format!("malformed route segment '{}'", segment)));
    };

    let name = urlencoding::decode(name)
        .map_err(|err| PlannerError::InvalidInput(format!("bad stop name '{}': {}", name, err)))?
        .into_owned();
    let lon = parse_degrees(lon)?;
    let lat = parse_degrees(lat)?;

    Ok(SavedStop {
        name,
        coordinate: Coordinate::new(lon, lat)?,
    })
}

fn parse_degrees(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PlannerError::InvalidInput(format!("'{}' is not a coordinate", raw)))
}
