//! Handlers for `<Region>` with its bounding box and level of detail.

use crate::error::Result;
use crate::model::{GeoNode, LatLonAltBox, Lod, NodeId, Region};
use crate::registry::{apply_to_parent, skip_element, ParseContext, TagHandler};

/// Handler for `<Region>` of a feature.
pub struct RegionHandler;

impl TagHandler for RegionHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let is_feature = parent
            .node
            .and_then(|id| ctx.document().node(id))
            .is_some_and(|node| node.as_feature().is_some());
        let Some(feature_id) = parent.node.filter(|_| is_feature) else {
            return Ok(skip_element(ctx, &parent));
        };

        let id = ctx.add_node(GeoNode::Region(Region::default()));
        if let Some(feature) = ctx
            .document_mut()
            .node_mut(feature_id)
            .and_then(GeoNode::as_feature_mut)
        {
            feature.region = Some(id);
        }
        Ok(Some(id))
    }
}

/// Attach a region part to the `<Region>` of the parent frame.
fn attach_to_region(
    ctx: &mut ParseContext<'_>,
    node: GeoNode,
    slot: fn(&mut Region) -> &mut Option<NodeId>,
) -> Option<NodeId> {
    let parent = ctx.parent();
    if !ctx.node_is::<Region>(&parent) {
        return skip_element(ctx, &parent);
    }
    let id = ctx.add_node(node);
    if let Some(region) = ctx.node_mut::<Region>(&parent) {
        *slot(region) = Some(id);
    }
    Some(id)
}

/// Handler for `<LatLonAltBox>`.
pub struct LatLonAltBoxHandler;

impl TagHandler for LatLonAltBoxHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_to_region(
            ctx,
            GeoNode::LatLonAltBox(LatLonAltBox::default()),
            |region| &mut region.lat_lon_alt_box,
        ))
    }
}

/// Handler for `<Lod>`.
pub struct LodHandler;

impl TagHandler for LodHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_to_region(
            ctx,
            GeoNode::Lod(Lod::default()),
            |region| &mut region.lod,
        ))
    }
}

/// Handler for `<minAltitude>`.
pub struct MinAltitudeHandler;

impl TagHandler for MinAltitudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LatLonAltBox>, |bounds, value| {
            if let Some(altitude) = value.f64() {
                bounds.min_altitude = altitude;
            }
        })
    }
}

/// Handler for `<maxAltitude>`.
pub struct MaxAltitudeHandler;

impl TagHandler for MaxAltitudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<LatLonAltBox>, |bounds, value| {
            if let Some(altitude) = value.f64() {
                bounds.max_altitude = altitude;
            }
        })
    }
}

/// Limit of a `<Lod>` set by one of its four child tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodLimit {
    MinPixels,
    MaxPixels,
    MinFadeExtent,
    MaxFadeExtent,
}

/// Handler for `<minLodPixels>`, `<maxLodPixels>`, `<minFadeExtent>` and
/// `<maxFadeExtent>`.
pub struct LodLimitHandler(pub LodLimit);

impl TagHandler for LodLimitHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let limit = self.0;
        apply_to_parent(ctx, GeoNode::get_mut::<Lod>, |lod, value| {
            let Some(number) = value.f64() else {
                return;
            };
            let slot = match limit {
                LodLimit::MinPixels => &mut lod.min_lod_pixels,
                LodLimit::MaxPixels => &mut lod.max_lod_pixels,
                LodLimit::MinFadeExtent => &mut lod.min_fade_extent,
                LodLimit::MaxFadeExtent => &mut lod.max_fade_extent,
            };
            *slot = number;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AltitudeMode, Container, GeoDocument};
    use crate::{parse_str, DataFormat, ParseOptions};

    fn parse(body: &str) -> GeoDocument {
        let xml = format!(r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{body}</Document></kml>"#);
        parse_str(DataFormat::Kml, &xml, ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_region_of_the_document() {
        let document = parse(
            "<Region>\
               <LatLonAltBox><north>50</north><south>45</south><east>10</east><west>5</west>\
                 <minAltitude>0</minAltitude><maxAltitude>5000</maxAltitude>\
                 <altitudeMode>absolute</altitudeMode></LatLonAltBox>\
               <Lod><minLodPixels>128</minLodPixels><maxFadeExtent>64</maxFadeExtent></Lod>\
             </Region>",
        );
        let root = document.get::<Container>(document.root()).unwrap();
        let region = document.get::<Region>(root.feature.region.unwrap()).unwrap();

        let bounds = document.get::<LatLonAltBox>(region.lat_lon_alt_box.unwrap()).unwrap();
        assert_eq!(
            bounds,
            &LatLonAltBox {
                north: 50.0,
                south: 45.0,
                east: 10.0,
                west: 5.0,
                min_altitude: 0.0,
                max_altitude: 5000.0,
                altitude_mode: AltitudeMode::Absolute,
            }
        );

        let lod = document.get::<Lod>(region.lod.unwrap()).unwrap();
        assert_eq!(lod.min_lod_pixels, 128.0);
        assert_eq!(lod.max_lod_pixels, -1.0);
        assert_eq!(lod.max_fade_extent, 64.0);
    }

    #[test]
    fn test_lat_lon_alt_box_requires_region() {
        let document = parse("<Placemark><LatLonAltBox><north>1</north></LatLonAltBox></Placemark>");
        assert!(!document.iter().any(|(_, node)| node.is::<LatLonAltBox>()));
    }

    #[test]
    fn test_lod_requires_region() {
        let document = parse("<Folder><Lod><minLodPixels>1</minLodPixels></Lod></Folder>");
        assert!(!document.iter().any(|(_, node)| node.is::<Lod>()));
    }
}
