//! Geometry nodes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::{AltitudeMode, Coordinates};
use super::NodeId;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Point {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub altitude_mode: AltitudeMode,
    pub extrude: bool,
}

/// Shared payload of `<LineString>` and `<LinearRing>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinates>,
    pub altitude_mode: AltitudeMode,
    pub extrude: bool,
    pub tessellate: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Polygon {
    /// The `LinearRing` of `<outerBoundaryIs>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_boundary: Option<NodeId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner_boundaries: Vec<NodeId>,
    pub altitude_mode: AltitudeMode,
    pub extrude: bool,
    pub tessellate: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MultiGeometry {
    pub geometries: Vec<NodeId>,
}

/// A time-tagged path (`gx:Track`, or one GPX track segment).
///
/// `when` is filled independently of `coordinates`; a GPX point without a
/// `<time>` leaves a `None` slot so both lists stay aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Track {
    pub coordinates: Vec<Coordinates>,
    pub when: Vec<Option<DateTime<Utc>>>,
    pub altitude_mode: AltitudeMode,
    /// Per-point value arrays keyed by name (e.g. `heartrate`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extended: BTreeMap<String, Vec<String>>,
}

impl Track {
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Coordinates recorded at exactly `when`.
    #[must_use]
    pub fn coordinates_at(&self, when: DateTime<Utc>) -> Option<Coordinates> {
        self.when
            .iter()
            .position(|slot| *slot == Some(when))
            .and_then(|index| self.coordinates.get(index).copied())
    }

    /// Set the value of a per-point array for the last point, padding
    /// skipped points. A repeated value for the same point replaces the
    /// earlier one.
    pub fn set_extended(&mut self, name: &str, value: String) {
        let point = self.coordinates.len().saturating_sub(1);
        let values = self.extended.entry(name.to_string()).or_default();
        if values.len() < point {
            values.resize(point, String::new());
        }
        match values.get_mut(point) {
            Some(slot) => *slot = value,
            None => values.push(value),
        }
    }
}

/// Corners of a `gx:LatLonQuad`, counter-clockwise from bottom left.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LatLonQuad {
    pub corners: Vec<Coordinates>,
}
