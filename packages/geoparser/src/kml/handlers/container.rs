//! Handlers for the document root and the container features.

use crate::error::Result;
use crate::kml::tags;
use crate::model::{Container, Feature, GeoNode, NodeId, Placemark};
use crate::registry::{skip_element, ParseContext, TagHandler};

/// Add a feature to the container of the parent frame and return it.
///
/// Nothing is added when the parent is not a document or folder.
pub(crate) fn attach_feature(
    ctx: &mut ParseContext<'_>,
    build: impl FnOnce(Feature) -> GeoNode,
) -> Option<NodeId> {
    let parent = ctx.parent();
    if !ctx.node_is::<Container>(&parent) {
        return skip_element(ctx, &parent);
    }

    let feature = Feature::with_id(ctx.attribute_opt("id"));
    let id = ctx.add_node(build(feature));
    if let Some(container) = ctx.node_mut::<Container>(&parent) {
        container.children.push(id);
    }
    Some(id)
}

/// Handler for `<kml>`: the document root created before parsing.
pub struct KmlHandler;

impl TagHandler for KmlHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(Some(ctx.document().root()))
    }
}

/// Handler for `<Document>`.
///
/// The top-level document is the root itself; nested documents become
/// children of their container.
pub struct DocumentHandler;

impl TagHandler for DocumentHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        if ctx.parent().represents(tags::KML) {
            let root = ctx.document().root();
            let id = ctx.attribute_opt("id");
            if let Some(container) = ctx.document_mut().get_mut::<Container>(root) {
                container.feature.id = id;
            }
            return Ok(Some(root));
        }

        Ok(attach_feature(ctx, |feature| {
            GeoNode::Document(Container {
                feature,
                ..Container::default()
            })
        }))
    }
}

/// Handler for `<Folder>`.
pub struct FolderHandler;

impl TagHandler for FolderHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_feature(ctx, |feature| {
            GeoNode::Folder(Container {
                feature,
                ..Container::default()
            })
        }))
    }
}

/// Handler for `<Placemark>`.
pub struct PlacemarkHandler;

impl TagHandler for PlacemarkHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_feature(ctx, |feature| {
            GeoNode::Placemark(Placemark {
                feature,
                ..Placemark::default()
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Container, GeoNode};
    use crate::{parse_str, DataFormat, ParseOptions};

    #[test]
    fn test_top_level_document_is_root() {
        let document = parse_str(
            DataFormat::Kml,
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document id="top"><Placemark/></Document></kml>"#,
            ParseOptions::default(),
        )
        .unwrap();

        let root = document.get::<Container>(document.root()).unwrap();
        assert_eq!(root.feature.id.as_deref(), Some("top"));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_nested_folders_and_documents() {
        let document = parse_str(
            DataFormat::Kml,
            r#"<kml xmlns="http://earth.google.com/kml/2.1">
                 <Document>
                   <Folder><Placemark/><Document><Placemark/></Document></Folder>
                   <Placemark/>
                 </Document>
               </kml>"#,
            ParseOptions::default(),
        )
        .unwrap();

        let root = document.features(document.root());
        assert_eq!(root.len(), 2);
        assert!(matches!(document.node(root[0]), Some(GeoNode::Folder(_))));
        let folder = document.features(root[0]);
        assert!(matches!(document.node(folder[1]), Some(GeoNode::Document(_))));
        assert_eq!(document.placemarks().len(), 3);
    }

    #[test]
    fn test_placemark_without_document() {
        let document = parse_str(
            DataFormat::Kml,
            r#"<kml xmlns="http://earth.google.com/kml/2.2"><Placemark/></kml>"#,
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(document.placemarks().len(), 1);
    }

    #[test]
    fn test_placemark_inside_placemark_is_ignored() {
        let document = parse_str(
            DataFormat::Kml,
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Placemark><Placemark/></Placemark></kml>"#,
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(document.placemarks().len(), 1);
        assert_eq!(document.len(), 2);
    }
}
