//! Tag handlers for DGML map themes.

use crate::error::Result;
use crate::model::{GeoNode, NodeId, SceneDocument, SceneHead, SceneLayer, SceneMap, SceneTexture};
use crate::registry::{apply_to_parent, skip_element, ParseContext, TagHandler};
use crate::values::parse_i32;

use super::tags;

/// Integer attribute of the current element; malformed values are logged
/// and treated as absent.
fn attribute_i32(ctx: &ParseContext<'_>, name: &str) -> Option<i32> {
    let text = ctx.attribute_opt(name)?;
    let value = parse_i32(&text);
    if value.is_none() {
        tracing::warn!(
            tag = %ctx.qualified_name(),
            attribute = name,
            value = %text,
            line = ctx.line_number(),
            "Expected an integer, ignoring attribute"
        );
    }
    value
}

/// Handler for `<dgml>`: the theme root created before parsing.
pub struct DgmlHandler;

impl TagHandler for DgmlHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(Some(ctx.document().root()))
    }
}

/// Handler for `<document>`: passes the theme root through.
pub struct DocumentHandler;

impl TagHandler for DocumentHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if parent.represents(tags::DGML) {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for `<head>`.
pub struct HeadHandler;

impl TagHandler for HeadHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneDocument>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let head = ctx.add_node(GeoNode::SceneHead(SceneHead::default()));
        if let Some(document) = ctx.node_mut::<SceneDocument>(&parent) {
            document.head = Some(head);
        }
        Ok(Some(head))
    }
}

/// Handler for `<name>` of the theme head.
pub struct NameHandler;

impl TagHandler for NameHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneHead>, |head, value| {
            head.name = value.into_text();
        })
    }
}

/// Handler for `<target>`, the planet the theme is drawn on.
pub struct TargetHandler;

impl TagHandler for TargetHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneHead>, |head, value| {
            head.target = value.into_text();
        })
    }
}

/// Handler for `<theme>`.
pub struct ThemeHandler;

impl TagHandler for ThemeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneHead>, |head, value| {
            head.theme = value.into_text();
        })
    }
}

/// Handler for `<description>`.
pub struct DescriptionHandler;

impl TagHandler for DescriptionHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneHead>, |head, value| {
            head.description = value.into_text();
        })
    }
}

/// Handler for `<visible>`.
pub struct VisibleHandler;

impl TagHandler for VisibleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneHead>, |head, value| {
            if let Some(visible) = value.bool() {
                head.visible = visible;
            }
        })
    }
}

/// Handler for `<map bgcolor="...">`.
pub struct MapHandler;

impl TagHandler for MapHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneDocument>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let map = ctx.add_node(GeoNode::SceneMap(SceneMap {
            background_color: ctx.attribute_opt(tags::ATTR_BGCOLOR),
            ..SceneMap::default()
        }));
        if let Some(document) = ctx.node_mut::<SceneDocument>(&parent) {
            document.map = Some(map);
        }
        Ok(Some(map))
    }
}

/// Handler for `<layer name="..." backend="...">`.
pub struct LayerHandler;

impl TagHandler for LayerHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneMap>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let layer = ctx.add_node(GeoNode::SceneLayer(SceneLayer {
            name: ctx.attribute(tags::ATTR_NAME),
            backend: ctx.attribute(tags::ATTR_BACKEND),
            ..SceneLayer::default()
        }));
        if let Some(map) = ctx.node_mut::<SceneMap>(&parent) {
            map.layers.push(layer);
        }
        Ok(Some(layer))
    }
}

/// Handler for `<texture name="...">`.
pub struct TextureHandler;

impl TagHandler for TextureHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneLayer>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let texture = ctx.add_node(GeoNode::SceneTexture(SceneTexture {
            name: ctx.attribute(tags::ATTR_NAME),
            ..SceneTexture::default()
        }));
        if let Some(layer) = ctx.node_mut::<SceneLayer>(&parent) {
            layer.textures.push(texture);
        }
        Ok(Some(texture))
    }
}

/// Handler for `<sourcedir>`.
pub struct SourceDirHandler;

impl TagHandler for SourceDirHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneTexture>, |texture, value| {
            texture.source_dir = value.into_text();
        })
    }
}

/// Handler for `<installmap>`.
pub struct InstallMapHandler;

impl TagHandler for InstallMapHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<SceneTexture>, |texture, value| {
            texture.install_map = value.into_text();
        })
    }
}

/// Handler for `<storageLayout>`: tile layout given as attributes.
pub struct StorageLayoutHandler;

impl TagHandler for StorageLayoutHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneTexture>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let mode = ctx.attribute_opt(tags::ATTR_MODE);
        let columns = attribute_i32(ctx, tags::ATTR_LEVEL_ZERO_COLUMNS);
        let rows = attribute_i32(ctx, tags::ATTR_LEVEL_ZERO_ROWS);
        let maximum_level = attribute_i32(ctx, tags::ATTR_MAXIMUM_TILE_LEVEL);

        if let Some(texture) = ctx.node_mut::<SceneTexture>(&parent) {
            if let Some(mode) = mode {
                texture.storage_layout = mode;
            }
            if let Some(columns) = columns {
                texture.level_zero_columns = columns;
            }
            if let Some(rows) = rows {
                texture.level_zero_rows = rows;
            }
            if let Some(maximum_level) = maximum_level {
                texture.maximum_tile_level = maximum_level;
            }
        }
        Ok(None)
    }
}

/// Handler for `<tileSize width="..." height="...">`.
pub struct TileSizeHandler;

impl TagHandler for TileSizeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneTexture>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let width = attribute_i32(ctx, tags::ATTR_WIDTH);
        let height = attribute_i32(ctx, tags::ATTR_HEIGHT);

        if let Some(texture) = ctx.node_mut::<SceneTexture>(&parent) {
            if let Some(width) = width {
                texture.tile_width = width;
            }
            if let Some(height) = height {
                texture.tile_height = height;
            }
        }
        Ok(None)
    }
}

/// Handler for `<projection name="...">`.
pub struct ProjectionHandler;

impl TagHandler for ProjectionHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneTexture>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let name = ctx.attribute_opt(tags::ATTR_NAME);
        if let (Some(name), Some(texture)) = (name, ctx.node_mut::<SceneTexture>(&parent)) {
            texture.projection = name;
        }
        Ok(None)
    }
}

/// Handler for `<downloadUrl>`: a tile server URL assembled from its
/// `protocol`, `host`, `port`, `path` and `query` attributes.
pub struct DownloadUrlHandler;

impl TagHandler for DownloadUrlHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<SceneTexture>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let Some(host) = ctx.attribute_opt(tags::ATTR_HOST) else {
            tracing::warn!(
                line = ctx.line_number(),
                "downloadUrl without host attribute, ignoring"
            );
            return Ok(None);
        };

        let protocol = ctx
            .attribute_opt(tags::ATTR_PROTOCOL)
            .unwrap_or_else(|| "http".to_string());
        let mut url = format!("{protocol}://{host}");
        if let Some(port) = attribute_i32(ctx, tags::ATTR_PORT) {
            url.push_str(&format!(":{port}"));
        }
        let path = ctx.attribute(tags::ATTR_PATH);
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&path);
        if let Some(query) = ctx.attribute_opt(tags::ATTR_QUERY) {
            url.push('?');
            url.push_str(&query);
        }

        if let Some(texture) = ctx.node_mut::<SceneTexture>(&parent) {
            texture.download_urls.push(url);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoDocument;
    use crate::{parse_str, DataFormat, ParseOptions};

    fn parse(body: &str) -> GeoDocument {
        let xml = format!(r#"<dgml xmlns="http://edu.kde.org/marble/dgml/2.0">{body}</dgml>"#);
        parse_str(DataFormat::Dgml, &xml, ParseOptions::default()).unwrap()
    }

    fn first_texture(document: &GeoDocument) -> &SceneTexture {
        document
            .iter()
            .find_map(|(_, node)| node.get::<SceneTexture>())
            .unwrap()
    }

    #[test]
    fn test_head() {
        let document = parse(
            "<document><head><name>Atlas</name><target>earth</target><theme>atlas</theme>\
             <visible>false</visible><description>Political map</description></head></document>",
        );
        let scene = document.get::<SceneDocument>(document.root()).unwrap();
        let head = document.get::<SceneHead>(scene.head.unwrap()).unwrap();

        assert_eq!(
            head,
            &SceneHead {
                name: "Atlas".to_string(),
                target: "earth".to_string(),
                theme: "atlas".to_string(),
                description: "Political map".to_string(),
                visible: false,
            }
        );
    }

    #[test]
    fn test_texture_layout() {
        let document = parse(
            r##"<document><map bgcolor="#000000"><layer name="srtm" backend="texture">
                 <texture name="srtm_data">
                   <sourcedir format="JPG">earth/srtm</sourcedir>
                   <installmap>srtm.jpg</installmap>
                   <storageLayout levelZeroColumns="2" levelZeroRows="1" maximumTileLevel="oops" mode="Marble"/>
                   <tileSize width="675" height="675"/>
                   <projection name="Mercator"/>
                 </texture>
               </layer></map></document>"##,
        );
        let scene = document.get::<SceneDocument>(document.root()).unwrap();
        let map = document.get::<SceneMap>(scene.map.unwrap()).unwrap();
        assert_eq!(map.background_color.as_deref(), Some("#000000"));
        let layer = document.get::<SceneLayer>(map.layers[0]).unwrap();
        assert_eq!(layer.name, "srtm");
        assert_eq!(layer.backend, "texture");

        let texture = first_texture(&document);
        assert_eq!(texture.name, "srtm_data");
        assert_eq!(texture.source_dir, "earth/srtm");
        assert_eq!(texture.install_map, "srtm.jpg");
        assert_eq!(texture.storage_layout, "Marble");
        assert_eq!(texture.level_zero_columns, 2);
        assert_eq!(texture.level_zero_rows, 1);
        assert_eq!(texture.maximum_tile_level, -1);
        assert_eq!((texture.tile_width, texture.tile_height), (675, 675));
        assert_eq!(texture.projection, "Mercator");
    }

    #[test]
    fn test_download_urls() {
        let document = parse(
            r#"<map><layer><texture>
                 <downloadUrl protocol="https" host="tile.example.org" port="8080" path="/tiles/"/>
                 <downloadUrl host="b.example.org" path="osm" query="key=1"/>
                 <downloadUrl path="/nohost"/>
               </texture></layer></map>"#,
        );
        let texture = first_texture(&document);
        assert_eq!(
            texture.download_urls,
            vec![
                "https://tile.example.org:8080/tiles/".to_string(),
                "http://b.example.org/osm?key=1".to_string(),
            ]
        );
    }

    #[test]
    fn test_texture_outside_layer_is_ignored() {
        let document = parse("<map><texture name=\"lost\"/></map>");
        assert!(!document.iter().any(|(_, node)| node.is::<SceneTexture>()));
    }
}
