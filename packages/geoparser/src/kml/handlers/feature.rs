//! Handlers for the simple properties every feature has.

use crate::error::Result;
use crate::model::{GeoNode, NodeId, Pair};
use crate::registry::{apply_to_parent, read_leaf, skip_element, ParseContext, TagHandler};

/// Handler for `<name>`.
pub struct NameHandler;

impl TagHandler for NameHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.name = value.into_text();
        })
    }
}

/// Handler for `<description>`.
pub struct DescriptionHandler;

impl TagHandler for DescriptionHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.description = value.into_text();
        })
    }
}

/// Handler for `<address>`.
pub struct AddressHandler;

impl TagHandler for AddressHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.address = value.into_text();
        })
    }
}

/// Handler for `<phoneNumber>`.
pub struct PhoneNumberHandler;

impl TagHandler for PhoneNumberHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.phone_number = value.into_text();
        })
    }
}

/// Handler for `<visibility>`.
pub struct VisibilityHandler;

impl TagHandler for VisibilityHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            if let Some(visible) = value.bool() {
                feature.visible = visible;
            }
        })
    }
}

/// Handler for `<open>`.
pub struct OpenHandler;

impl TagHandler for OpenHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            if let Some(open) = value.bool() {
                feature.open = open;
            }
        })
    }
}

/// Handler for `<styleUrl>`, of a feature or of a style map `<Pair>`.
pub struct StyleUrlHandler;

impl TagHandler for StyleUrlHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(id) = parent.node else {
            return Ok(skip_element(ctx, &parent));
        };

        let is_feature = ctx
            .document()
            .node(id)
            .is_some_and(|node| node.as_feature().is_some());
        if !is_feature && !ctx.node_is::<Pair>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }

        let url = read_leaf(ctx)?.non_empty();
        match ctx.document_mut().node_mut(id) {
            Some(GeoNode::Pair(pair)) => pair.style_url = url,
            Some(node) => {
                if let Some(feature) = node.as_feature_mut() {
                    feature.style_url = url;
                }
            }
            None => {}
        }
        Ok(None)
    }
}
