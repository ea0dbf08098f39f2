//! Features: documents, folders, placemarks and overlays.

use serde::Serialize;

use super::common::{AltitudeMode, Color, Coordinates};
use super::NodeId;

/// Properties every feature carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone_number: String,
    pub visible: bool,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_url: Option<String>,
    /// Inline `<Style>` of this feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub look_at: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_span: Option<NodeId>,
    /// `<Data>` entries of the feature's `<ExtendedData>`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extended_data: Vec<NodeId>,
}

impl Default for Feature {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            address: String::new(),
            phone_number: String::new(),
            visible: true,
            open: false,
            style_url: None,
            style: None,
            region: None,
            look_at: None,
            time_stamp: None,
            time_span: None,
            extended_data: Vec::new(),
        }
    }
}

impl Feature {
    #[must_use]
    pub fn with_id(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

/// A `<Document>` or `<Folder>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Container {
    #[serde(flatten)]
    pub feature: Feature,
    /// Child features in document order.
    pub children: Vec<NodeId>,
    /// Shared `<Style>` and `<StyleMap>` definitions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Placemark {
    #[serde(flatten)]
    pub feature: Feature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<NodeId>,
    /// Location of the placemark, kept in sync with its point geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroundOverlay {
    #[serde(flatten)]
    pub feature: Feature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub draw_order: i32,
    pub altitude: f64,
    pub altitude_mode: AltitudeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lon_box: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat_lon_quad: Option<NodeId>,
}
