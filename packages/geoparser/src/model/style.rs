//! Style nodes.

use serde::Serialize;

use super::common::{Color, ColorMode};
use super::NodeId;

/// Colour settings shared by the four colour styles.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColorStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub color_mode: ColorMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_style: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poly_style: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_style: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconStyle {
    #[serde(flatten)]
    pub color_style: ColorStyle,
    pub scale: f64,
    /// Degrees, 0 to 360.
    pub heading: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_href: Option<String>,
}

impl Default for IconStyle {
    fn default() -> Self {
        Self {
            color_style: ColorStyle::default(),
            scale: 1.0,
            heading: 0.0,
            icon_href: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    #[serde(flatten)]
    pub color_style: ColorStyle,
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color_style: ColorStyle::default(),
            width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyStyle {
    #[serde(flatten)]
    pub color_style: ColorStyle,
    pub fill: bool,
    pub outline: bool,
}

impl Default for PolyStyle {
    fn default() -> Self {
        Self {
            color_style: ColorStyle::default(),
            fill: true,
            outline: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    #[serde(flatten)]
    pub color_style: ColorStyle,
    pub scale: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color_style: ColorStyle::default(),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyleMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub pairs: Vec<NodeId>,
}

/// One `key` to style mapping of a `<StyleMap>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Pair {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeId>,
}
