//! Snapshot wire types: one consistent frame of simulation state.

use serde::Deserialize;

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

/// A straight lane piece. Coordinates and width are in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LaneSegment {
    #[serde(rename = "startx")]
    pub start_x: f64,
    #[serde(rename = "starty")]
    pub start_y: f64,
    #[serde(rename = "endx")]
    pub end_x: f64,
    #[serde(rename = "endy")]
    pub end_y: f64,
    pub width: f64,
}

impl LaneSegment {
    #[must_use]
    pub fn new(start: (f64, f64), end: (f64, f64), width: f64) -> Self {
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            width,
        }
    }
}

/// A simulated vehicle. `heading` is in radians.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "direction")]
    pub heading: f64,
    pub width: f64,
    pub length: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrafficSignal {
    pub x: f64,
    pub y: f64,
    pub color: String,
}

/// Whole world state for one render cycle. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub lanes: Vec<LaneSegment>,
    #[serde(rename = "cars", default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(rename = "traffic_lights", default)]
    pub signals: Vec<TrafficSignal>,
}

impl Snapshot {
    /// Parse a snapshot endpoint payload.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the payload does not have the snapshot shape.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// True when `other` carries the same lane geometry, so a cached viewport still applies.
    #[must_use]
    pub fn same_geometry(&self, other: &Snapshot) -> bool {
        self.lanes == other.lanes
    }
}
