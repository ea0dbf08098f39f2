//! Bounding boxes, regions, camera views, time primitives and data entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::common::AltitudeMode;
use super::NodeId;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LatLonAltBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub altitude_mode: AltitudeMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lon_alt_box: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lod: Option<NodeId>,
}

/// Level of detail limits of a region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lod {
    pub min_lod_pixels: f64,
    /// `-1` means visible at any size.
    pub max_lod_pixels: f64,
    pub min_fade_extent: f64,
    pub max_fade_extent: f64,
}

impl Default for Lod {
    fn default() -> Self {
        Self {
            min_lod_pixels: 0.0,
            max_lod_pixels: -1.0,
            min_fade_extent: 0.0,
            max_fade_extent: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LookAt {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    pub heading: f64,
    pub tilt: f64,
    pub range: f64,
    pub altitude_mode: AltitudeMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeStamp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimeSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

/// A named `<Data>` value of `<ExtendedData>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Data {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub value: String,
}
