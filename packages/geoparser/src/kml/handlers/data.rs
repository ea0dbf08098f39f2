//! Handlers for `<ExtendedData>` name/value entries.

use crate::error::Result;
use crate::kml::tags;
use crate::model::{Data, GeoNode, NodeId};
use crate::registry::{apply_to_parent, skip_element, ParseContext, TagHandler};

/// Whether the frame holds a feature node.
fn holds_feature(ctx: &ParseContext<'_>, node: Option<NodeId>) -> bool {
    node.and_then(|id| ctx.document().node(id))
        .is_some_and(|node| node.as_feature().is_some())
}

/// Handler for `<ExtendedData>`: passes the feature through.
pub struct ExtendedDataHandler;

impl TagHandler for ExtendedDataHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if holds_feature(ctx, parent.node) {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for `<Data name="...">`.
pub struct DataHandler;

impl TagHandler for DataHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let feature_id = parent
            .node
            .filter(|_| parent.represents(tags::EXTENDED_DATA) && holds_feature(ctx, parent.node));
        let Some(feature_id) = feature_id else {
            return Ok(skip_element(ctx, &parent));
        };

        let id = ctx.add_node(GeoNode::Data(Data {
            name: ctx.attribute("name"),
            ..Data::default()
        }));
        if let Some(feature) = ctx
            .document_mut()
            .node_mut(feature_id)
            .and_then(GeoNode::as_feature_mut)
        {
            feature.extended_data.push(id);
        }
        Ok(Some(id))
    }
}

/// Handler for `<value>` of a `<Data>` entry.
pub struct ValueHandler;

impl TagHandler for ValueHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<Data>, |data, value| {
            data.value = value.into_text();
        })
    }
}

/// Handler for `<displayName>` of a `<Data>` entry.
pub struct DisplayNameHandler;

impl TagHandler for DisplayNameHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<Data>, |data, value| {
            data.display_name = value.non_empty();
        })
    }
}
