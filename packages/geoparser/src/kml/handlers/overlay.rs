//! Handlers for ground overlays and bounding boxes.

use crate::error::Result;
use crate::model::{GeoNode, GroundOverlay, LatLonAltBox, LatLonBox, LookAt, NodeId};
use crate::registry::{apply_to_parent, read_leaf, skip_element, ParseContext, TagHandler};

use super::container::attach_feature;

/// Handler for `<GroundOverlay>`.
pub struct GroundOverlayHandler;

impl TagHandler for GroundOverlayHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_feature(ctx, |feature| {
            GeoNode::GroundOverlay(GroundOverlay {
                feature,
                ..GroundOverlay::default()
            })
        }))
    }
}

/// Handler for `<drawOrder>`.
pub struct DrawOrderHandler;

impl TagHandler for DrawOrderHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<GroundOverlay>, |overlay, value| {
            if let Some(draw_order) = value.i32() {
                overlay.draw_order = draw_order;
            }
        })
    }
}

/// Handler for `<LatLonBox>` of a ground overlay.
pub struct LatLonBoxHandler;

impl TagHandler for LatLonBoxHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<GroundOverlay>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let id = ctx.add_node(GeoNode::LatLonBox(LatLonBox::default()));
        if let Some(overlay) = ctx.node_mut::<GroundOverlay>(&parent) {
            overlay.lat_lon_box = Some(id);
        }
        Ok(Some(id))
    }
}

/// Edge of a bounding box set by `<north>`, `<south>`, `<east>` or `<west>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    North,
    South,
    East,
    West,
}

/// Handler for one edge of a `<LatLonBox>` or `<LatLonAltBox>`.
pub struct EdgeHandler(pub Edge);

impl TagHandler for EdgeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let fits = ctx.node_is::<LatLonBox>(&parent) || ctx.node_is::<LatLonAltBox>(&parent);
        let Some(id) = parent.node.filter(|_| fits) else {
            return Ok(skip_element(ctx, &parent));
        };

        let Some(degrees) = read_leaf(ctx)?.f64() else {
            return Ok(None);
        };
        let edges = match ctx.document_mut().node_mut(id) {
            Some(GeoNode::LatLonBox(bounds)) => Some((
                &mut bounds.north,
                &mut bounds.south,
                &mut bounds.east,
                &mut bounds.west,
            )),
            Some(GeoNode::LatLonAltBox(bounds)) => Some((
                &mut bounds.north,
                &mut bounds.south,
                &mut bounds.east,
                &mut bounds.west,
            )),
            _ => None,
        };
        if let Some((north, south, east, west)) = edges {
            let slot = match self.0 {
                Edge::North => north,
                Edge::South => south,
                Edge::East => east,
                Edge::West => west,
            };
            *slot = degrees;
        }
        Ok(None)
    }
}

/// Handler for `<rotation>` of a `<LatLonBox>`.
pub struct RotationHandler;

impl TagHandler for RotationHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LatLonBox>, |bounds, value| {
            if let Some(rotation) = value.f64() {
                bounds.rotation = rotation;
            }
        })
    }
}

/// Handler for `<altitude>` of a camera view or ground overlay.
pub struct AltitudeHandler;

impl TagHandler for AltitudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<LookAt>(&parent) {
            return apply_to_parent(ctx, GeoNode::get_mut::<LookAt>, |look_at, value| {
                if let Some(altitude) = value.f64() {
                    look_at.altitude = altitude;
                }
            });
        }
        apply_to_parent(ctx, GeoNode::get_mut::<GroundOverlay>, |overlay, value| {
            if let Some(altitude) = value.f64() {
                overlay.altitude = altitude;
            }
        })
    }
}
