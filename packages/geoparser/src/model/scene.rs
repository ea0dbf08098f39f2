//! Map theme (DGML) nodes.

use serde::Serialize;

use super::NodeId;

/// Root of a parsed map theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SceneDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneHead {
    pub name: String,
    pub target: String,
    pub theme: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub visible: bool,
}

impl Default for SceneHead {
    fn default() -> Self {
        Self {
            name: String::new(),
            target: String::new(),
            theme: String::new(),
            description: String::new(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SceneMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub layers: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SceneLayer {
    pub name: String,
    pub backend: String,
    pub textures: Vec<NodeId>,
}

/// A tiled texture dataset of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneTexture {
    pub name: String,
    pub source_dir: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub install_map: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_layout: String,
    pub level_zero_columns: i32,
    pub level_zero_rows: i32,
    /// `-1` when unbounded.
    pub maximum_tile_level: i32,
    pub tile_width: i32,
    pub tile_height: i32,
    pub projection: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub download_urls: Vec<String>,
}

impl Default for SceneTexture {
    fn default() -> Self {
        Self {
            name: String::new(),
            source_dir: String::new(),
            install_map: String::new(),
            storage_layout: String::new(),
            level_zero_columns: 1,
            level_zero_rows: 1,
            maximum_tile_level: -1,
            tile_width: 256,
            tile_height: 256,
            projection: "Equirectangular".to_string(),
            download_urls: Vec::new(),
        }
    }
}
