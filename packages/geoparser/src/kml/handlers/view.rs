//! Handlers for `<LookAt>` camera views.

use crate::error::Result;
use crate::model::{GeoNode, LookAt, NodeId};
use crate::registry::{apply_to_parent, skip_element, ParseContext, TagHandler};

/// Handler for `<LookAt>` of a feature.
pub struct LookAtHandler;

impl TagHandler for LookAtHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let is_feature = parent
            .node
            .and_then(|id| ctx.document().node(id))
            .is_some_and(|node| node.as_feature().is_some());
        let Some(feature_id) = parent.node.filter(|_| is_feature) else {
            return Ok(skip_element(ctx, &parent));
        };

        let id = ctx.add_node(GeoNode::LookAt(LookAt::default()));
        if let Some(feature) = ctx
            .document_mut()
            .node_mut(feature_id)
            .and_then(GeoNode::as_feature_mut)
        {
            feature.look_at = Some(id);
        }
        Ok(Some(id))
    }
}

/// Handler for `<longitude>`.
pub struct LongitudeHandler;

impl TagHandler for LongitudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
            if let Some(longitude) = value.f64() {
                look_at.longitude = longitude;
            }
        })
    }
}

/// Handler for `<latitude>`.
pub struct LatitudeHandler;

impl TagHandler for LatitudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
            if let Some(latitude) = value.f64() {
                look_at.latitude = latitude;
            }
        })
    }
}

/// Handler for `<tilt>`.
pub struct TiltHandler;

impl TagHandler for TiltHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
            if let Some(tilt) = value.f64() {
                look_at.tilt = tilt;
            }
        })
    }
}

/// Handler for `<range>`, the distance in meters from the looked-at point.
pub struct RangeHandler;

impl TagHandler for RangeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
            if let Some(range) = value.f64() {
                look_at.range = range;
            }
        })
    }
}
