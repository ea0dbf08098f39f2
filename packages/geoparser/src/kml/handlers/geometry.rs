//! Handlers for geometries and their flags.

use crate::error::Result;
use crate::kml::tags;
use crate::model::{
    AltitudeMode, GeoNode, GroundOverlay, LatLonQuad, LineString, MultiGeometry, NodeId,
    Placemark, Point, Polygon, Track,
};
use crate::registry::{read_leaf, skip_element, ParseContext, StackFrame, TagHandler};

/// Add a geometry to the placemark or multi-geometry of the parent frame.
fn attach_geometry(ctx: &mut ParseContext<'_>, build: impl FnOnce() -> GeoNode) -> Option<NodeId> {
    let parent = ctx.parent();
    let fits = ctx.node_is::<Placemark>(&parent) || ctx.node_is::<MultiGeometry>(&parent);
    if !fits {
        return skip_element(ctx, &parent);
    }

    let id = ctx.add_node(build());
    if let Some(placemark) = ctx.node_mut::<Placemark>(&parent) {
        placemark.geometry = Some(id);
    } else if let Some(multi) = ctx.node_mut::<MultiGeometry>(&parent) {
        multi.geometries.push(id);
    }
    Some(id)
}

/// Resolve the node a geometry flag applies to.
///
/// `<Point>` inside a placemark passes the placemark through, so flags
/// below it go to the placemark's point geometry.
fn geometry_target(ctx: &mut ParseContext<'_>, parent: &StackFrame) -> Option<NodeId> {
    let id = parent.node?;
    if parent.represents(tags::POINT) && ctx.node_is::<Placemark>(parent) {
        return ctx.document_mut().placemark_point(id);
    }
    Some(id)
}

/// Handler for `<Point>`.
///
/// Inside a placemark this returns the placemark itself, whose coordinate
/// the nested `<coordinates>` sets. Inside a multi-geometry a new point is
/// created.
pub struct PointHandler;

impl TagHandler for PointHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if let Some(placemark) = parent.node.filter(|_| ctx.node_is::<Placemark>(&parent)) {
            ctx.document_mut().placemark_point(placemark);
            return Ok(Some(placemark));
        }
        if ctx.node_is::<MultiGeometry>(&parent) {
            return Ok(attach_geometry(ctx, || GeoNode::Point(Point::default())));
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for `<LineString>`.
pub struct LineStringHandler;

impl TagHandler for LineStringHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_geometry(ctx, || GeoNode::LineString(LineString::default())))
    }
}

/// Handler for `<LinearRing>`: a polygon boundary or a geometry of its own.
pub struct LinearRingHandler;

impl TagHandler for LinearRingHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let outer = parent.represents(tags::OUTER_BOUNDARY_IS);
        let inner = parent.represents(tags::INNER_BOUNDARY_IS);

        if (outer || inner) && ctx.node_is::<Polygon>(&parent) {
            let ring = ctx.add_node(GeoNode::LinearRing(LineString::default()));
            if let Some(polygon) = ctx.node_mut::<Polygon>(&parent) {
                if outer {
                    polygon.outer_boundary = Some(ring);
                } else {
                    polygon.inner_boundaries.push(ring);
                }
            }
            return Ok(Some(ring));
        }

        Ok(attach_geometry(ctx, || GeoNode::LinearRing(LineString::default())))
    }
}

/// Handler for `<Polygon>`.
pub struct PolygonHandler;

impl TagHandler for PolygonHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_geometry(ctx, || GeoNode::Polygon(Polygon::default())))
    }
}

/// Handler for `<outerBoundaryIs>` and `<innerBoundaryIs>`: passes the
/// polygon through to the ring inside.
pub struct BoundaryHandler;

impl TagHandler for BoundaryHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<Polygon>(&parent) {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for `<MultiGeometry>`.
pub struct MultiGeometryHandler;

impl TagHandler for MultiGeometryHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_geometry(ctx, || {
            GeoNode::MultiGeometry(MultiGeometry::default())
        }))
    }
}

/// Handler for `<gx:Track>`.
pub struct TrackHandler;

impl TagHandler for TrackHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_geometry(ctx, || GeoNode::Track(Track::default())))
    }
}

/// Handler for `<gx:LatLonQuad>` of a ground overlay.
pub struct LatLonQuadHandler;

impl TagHandler for LatLonQuadHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !ctx.node_is::<GroundOverlay>(&parent) {
            return Ok(skip_element(ctx, &parent));
        }
        let quad = ctx.add_node(GeoNode::LatLonQuad(LatLonQuad::default()));
        if let Some(overlay) = ctx.node_mut::<GroundOverlay>(&parent) {
            overlay.lat_lon_quad = Some(quad);
        }
        Ok(Some(quad))
    }
}

/// Handler for `<altitudeMode>` and `<gx:altitudeMode>`.
///
/// Unknown values fall back to `clampToGround`.
pub struct AltitudeModeHandler;

impl TagHandler for AltitudeModeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(target) = geometry_target(ctx, &parent) else {
            return Ok(skip_element(ctx, &parent));
        };

        let value = read_leaf(ctx)?;
        let mode = AltitudeMode::from_kml(value.text()).unwrap_or_else(|| {
            value.warn_invalid("an altitude mode");
            AltitudeMode::ClampToGround
        });

        let slot = match ctx.document_mut().node_mut(target) {
            Some(GeoNode::Point(point)) => Some(&mut point.altitude_mode),
            Some(GeoNode::LineString(line) | GeoNode::LinearRing(line)) => {
                Some(&mut line.altitude_mode)
            }
            Some(GeoNode::Polygon(polygon)) => Some(&mut polygon.altitude_mode),
            Some(GeoNode::Track(track)) => Some(&mut track.altitude_mode),
            Some(GeoNode::GroundOverlay(overlay)) => Some(&mut overlay.altitude_mode),
            Some(GeoNode::LatLonAltBox(lat_lon_alt_box)) => Some(&mut lat_lon_alt_box.altitude_mode),
            Some(GeoNode::LookAt(look_at)) => Some(&mut look_at.altitude_mode),
            _ => None,
        };
        match slot {
            Some(slot) => *slot = mode,
            None => return Ok(skip_element(ctx, &parent)),
        }
        Ok(None)
    }
}

/// Handler for `<extrude>`.
pub struct ExtrudeHandler;

impl TagHandler for ExtrudeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(target) = geometry_target(ctx, &parent) else {
            return Ok(skip_element(ctx, &parent));
        };

        let Some(extrude) = read_leaf(ctx)?.bool() else {
            return Ok(None);
        };
        let slot = match ctx.document_mut().node_mut(target) {
            Some(GeoNode::Point(point)) => Some(&mut point.extrude),
            Some(GeoNode::LineString(line) | GeoNode::LinearRing(line)) => Some(&mut line.extrude),
            Some(GeoNode::Polygon(polygon)) => Some(&mut polygon.extrude),
            _ => None,
        };
        match slot {
            Some(slot) => *slot = extrude,
            None => return Ok(skip_element(ctx, &parent)),
        }
        Ok(None)
    }
}

/// Handler for `<tessellate>`.
pub struct TessellateHandler;

impl TagHandler for TessellateHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let fits = ctx.node_is::<LineString>(&parent) || ctx.node_is::<Polygon>(&parent);
        if !fits {
            return Ok(skip_element(ctx, &parent));
        }

        let Some(tessellate) = read_leaf(ctx)?.bool() else {
            return Ok(None);
        };
        if let Some(line) = ctx.node_mut::<LineString>(&parent) {
            line.tessellate = tessellate;
        } else if let Some(polygon) = ctx.node_mut::<Polygon>(&parent) {
            polygon.tessellate = tessellate;
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        AltitudeMode, GeoDocument, LineString, MultiGeometry, NodeId, Placemark, Point, Polygon,
    };
    use crate::{parse_str, DataFormat, ParseOptions};

    fn parse(body: &str) -> GeoDocument {
        let xml = format!(r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{body}</Document></kml>"#);
        parse_str(DataFormat::Kml, &xml, ParseOptions::default()).unwrap()
    }

    fn geometry_of_first(document: &GeoDocument) -> NodeId {
        let placemark = document.placemarks()[0];
        document.get::<Placemark>(placemark).unwrap().geometry.unwrap()
    }

    #[test]
    fn test_point_flags_go_to_placemark_point() {
        let document = parse(
            "<Placemark><Point><extrude>1</extrude><altitudeMode>absolute</altitudeMode>\
             <coordinates>8.5,47.3,400</coordinates></Point></Placemark>",
        );
        let point = document.get::<Point>(geometry_of_first(&document)).unwrap();

        assert!(point.extrude);
        assert_eq!(point.altitude_mode, AltitudeMode::Absolute);
    }

    #[test]
    fn test_bogus_altitude_mode_defaults() {
        let document = parse(
            "<Placemark><LineString><altitudeMode>relativeToGround</altitudeMode>\
             <altitudeMode>bogus</altitudeMode></LineString></Placemark>",
        );
        let line = document.get::<LineString>(geometry_of_first(&document)).unwrap();
        assert_eq!(line.altitude_mode, AltitudeMode::ClampToGround);
    }

    #[test]
    fn test_gx_altitude_mode() {
        let xml = r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">
            <Placemark><Polygon><gx:altitudeMode>clampToSeaFloor</gx:altitudeMode></Polygon></Placemark>
        </kml>"#;
        let document = parse_str(DataFormat::Kml, xml, ParseOptions::default()).unwrap();
        let polygon = document.get::<Polygon>(geometry_of_first(&document)).unwrap();
        assert_eq!(polygon.altitude_mode, AltitudeMode::ClampToSeaFloor);
    }

    #[test]
    fn test_polygon_boundaries() {
        let document = parse(
            "<Placemark><Polygon><tessellate>1</tessellate>\
             <outerBoundaryIs><LinearRing><coordinates>0,0 1,0 1,1 0,0</coordinates></LinearRing></outerBoundaryIs>\
             <innerBoundaryIs><LinearRing><coordinates>0.2,0.2 0.4,0.2 0.2,0.4 0.2,0.2</coordinates></LinearRing></innerBoundaryIs>\
             <innerBoundaryIs><LinearRing/></innerBoundaryIs>\
             </Polygon></Placemark>",
        );
        let polygon = document.get::<Polygon>(geometry_of_first(&document)).unwrap();

        assert!(polygon.tessellate);
        assert_eq!(polygon.inner_boundaries.len(), 2);
        let outer = document.get::<LineString>(polygon.outer_boundary.unwrap()).unwrap();
        assert_eq!(outer.coordinates.len(), 4);
    }

    #[test]
    fn test_multi_geometry_collects_children() {
        let document = parse(
            "<Placemark><MultiGeometry><Point><coordinates>1,2</coordinates></Point>\
             <LineString><coordinates>1,2 3,4</coordinates></LineString>\
             <MultiGeometry/></MultiGeometry></Placemark>",
        );
        let multi = document
            .get::<MultiGeometry>(geometry_of_first(&document))
            .unwrap();

        assert_eq!(multi.geometries.len(), 3);
        let point = document.get::<Point>(multi.geometries[0]).unwrap();
        assert_eq!(point.coordinates.unwrap().latitude, 2.0);
    }

    #[test]
    fn test_geometry_outside_placemark_is_ignored() {
        let document = parse("<LineString><coordinates>1,2 3,4</coordinates></LineString>");
        assert_eq!(document.len(), 1);
    }
}
