//! Tag handlers for GPX documents.
//!
//! Waypoints become placemarks with a point, routes placemarks with a line
//! string. A track becomes a placemark whose multi-geometry holds one
//! `Track` per segment; every `<trkpt>` appends a coordinate together with
//! an empty timestamp slot that a nested `<time>` fills.

use crate::error::Result;
use crate::model::{
    Coordinates, GeoNode, LineString, MultiGeometry, NodeId, NodeVariant, Placemark, TimeStamp,
    Track,
};
use crate::registry::{
    apply_to_parent, read_leaf, skip_element, ParseContext, StackFrame, TagHandler,
};
use crate::values::parse_f64;

use super::tags;

/// Position from the `lat`/`lon` attributes of the current element.
fn read_position(ctx: &ParseContext<'_>) -> Option<Coordinates> {
    let latitude = parse_f64(&ctx.attribute(tags::ATTR_LAT));
    let longitude = parse_f64(&ctx.attribute(tags::ATTR_LON));
    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Some(Coordinates::new(longitude, latitude, 0.0)),
        _ => {
            tracing::warn!(
                tag = %ctx.qualified_name(),
                lat = %ctx.attribute(tags::ATTR_LAT),
                lon = %ctx.attribute(tags::ATTR_LON),
                line = ctx.line_number(),
                "Expected numeric lat/lon attributes, ignoring point"
            );
            None
        }
    }
}

/// Add a placemark with `geometry` to the document root.
fn add_placemark(
    ctx: &mut ParseContext<'_>,
    parent: &StackFrame,
    geometry: Option<GeoNode>,
) -> Option<NodeId> {
    if !parent.represents(tags::GPX) {
        return skip_element(ctx, parent);
    }
    let geometry = geometry.map(|node| ctx.add_node(node));
    let placemark = ctx.add_node(GeoNode::Placemark(Placemark {
        geometry,
        ..Placemark::default()
    }));
    let root = ctx.document().root();
    if let Some(GeoNode::Document(container)) = ctx.document_mut().node_mut(root) {
        container.children.push(placemark);
    }
    Some(placemark)
}

/// Geometry of the placemark held by `frame`, if it is of kind `T`.
fn placemark_geometry<T: NodeVariant>(
    ctx: &ParseContext<'_>,
    frame: &StackFrame,
) -> Option<NodeId> {
    ctx.node::<Placemark>(frame)?
        .geometry
        .filter(|&id| ctx.document().is::<T>(id))
}

/// Handler for `<gpx>`: the document root created before parsing.
pub struct GpxHandler;

impl TagHandler for GpxHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(Some(ctx.document().root()))
    }
}

/// Handler for `<wpt>`.
pub struct WptHandler;

impl TagHandler for WptHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let Some(placemark) = add_placemark(ctx, &parent, None) else {
            return Ok(None);
        };
        if let Some(position) = read_position(ctx) {
            ctx.document_mut().set_placemark_coordinate(placemark, position);
        }
        Ok(Some(placemark))
    }
}

/// Handler for `<rte>`.
pub struct RteHandler;

impl TagHandler for RteHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        Ok(add_placemark(
            ctx,
            &parent,
            Some(GeoNode::LineString(LineString::default())),
        ))
    }
}

/// Handler for `<rtept>`: appends to the route's line string and passes
/// it through.
pub struct RteptHandler;

impl TagHandler for RteptHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let line = placemark_geometry::<LineString>(ctx, &parent)
            .filter(|_| parent.represents(tags::RTE));
        let Some(line) = line else {
            return Ok(skip_element(ctx, &parent));
        };
        let Some(position) = read_position(ctx) else {
            return Ok(None);
        };
        if let Some(line_string) = ctx.document_mut().get_mut::<LineString>(line) {
            line_string.coordinates.push(position);
        }
        Ok(Some(line))
    }
}

/// Handler for `<trk>`.
pub struct TrkHandler;

impl TagHandler for TrkHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        Ok(add_placemark(
            ctx,
            &parent,
            Some(GeoNode::MultiGeometry(MultiGeometry::default())),
        ))
    }
}

/// Handler for `<trkseg>`: one `Track` per segment.
pub struct TrksegHandler;

impl TagHandler for TrksegHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let multi = placemark_geometry::<MultiGeometry>(ctx, &parent)
            .filter(|_| parent.represents(tags::TRK));
        let Some(multi) = multi else {
            return Ok(skip_element(ctx, &parent));
        };
        let track = ctx.add_node(GeoNode::Track(Track::default()));
        if let Some(multi) = ctx.document_mut().get_mut::<MultiGeometry>(multi) {
            multi.geometries.push(track);
        }
        Ok(Some(track))
    }
}

/// Handler for `<trkpt>`: appends a point to the segment's track and
/// passes the track through.
pub struct TrkptHandler;

impl TagHandler for TrkptHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !(parent.represents(tags::TRKSEG) && ctx.node_is::<Track>(&parent)) {
            return Ok(skip_element(ctx, &parent));
        }
        let Some(position) = read_position(ctx) else {
            return Ok(None);
        };
        if let Some(track) = ctx.node_mut::<Track>(&parent) {
            track.coordinates.push(position);
            track.when.push(None);
        }
        Ok(parent.node)
    }
}

/// Handler for `<name>` of a waypoint, route, track or the file itself.
pub struct NameHandler;

impl TagHandler for NameHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.name = value.into_text();
        })
    }
}

/// Handler for `<desc>`.
pub struct DescHandler;

impl TagHandler for DescHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::as_feature_mut, |feature, value| {
            feature.description = value.into_text();
        })
    }
}

/// Handler for `<ele>`: the altitude of the enclosing point.
pub struct EleHandler;

impl TagHandler for EleHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let in_point = [tags::WPT, tags::RTEPT, tags::TRKPT]
            .iter()
            .any(|tag| parent.represents(tag));
        let Some(id) = parent.node.filter(|_| in_point) else {
            return Ok(skip_element(ctx, &parent));
        };

        let Some(altitude) = read_leaf(ctx)?.f64() else {
            return Ok(None);
        };
        if let Some(coordinate) = ctx.node::<Placemark>(&parent).and_then(|p| p.coordinate) {
            ctx.document_mut().set_placemark_coordinate(
                id,
                Coordinates {
                    altitude,
                    ..coordinate
                },
            );
            return Ok(None);
        }
        let last = match ctx.document_mut().node_mut(id) {
            Some(GeoNode::LineString(line)) => line.coordinates.last_mut(),
            Some(GeoNode::Track(track)) => track.coordinates.last_mut(),
            _ => None,
        };
        if let Some(last) = last {
            last.altitude = altitude;
        }
        Ok(None)
    }
}

/// Handler for `<time>` of a track point or waypoint.
///
/// The file and metadata timestamps are not kept.
pub struct TimeHandler;

impl TagHandler for TimeHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if parent.represents(tags::TRKPT) && ctx.node_is::<Track>(&parent) {
            let when = read_leaf(ctx)?.datetime();
            if let Some(slot) = ctx
                .node_mut::<Track>(&parent)
                .and_then(|track| track.when.last_mut())
            {
                *slot = when;
            }
            return Ok(None);
        }

        if !(parent.represents(tags::WPT) && ctx.node_is::<Placemark>(&parent)) {
            return Ok(skip_element(ctx, &parent));
        }
        let when = read_leaf(ctx)?.datetime();
        let stamp = ctx.add_node(GeoNode::TimeStamp(TimeStamp { when }));
        if let Some(placemark) = ctx.node_mut::<Placemark>(&parent) {
            placemark.feature.time_stamp = Some(stamp);
        }
        Ok(None)
    }
}

/// Handler for `<extensions>` of a track or track point: passes the
/// parent's node through.
pub struct ExtensionsHandler;

impl TagHandler for ExtensionsHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let passes = (parent.represents(tags::TRK) && ctx.node_is::<Placemark>(&parent))
            || (parent.represents(tags::TRKPT) && ctx.node_is::<Track>(&parent));
        if passes {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for Garmin's `<TrackPointExtension>`.
pub struct TrackPointExtensionHandler;

impl TagHandler for TrackPointExtensionHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if parent.represents(tags::EXTENSIONS) && ctx.node_is::<Track>(&parent) {
            return Ok(parent.node);
        }
        Ok(skip_element(ctx, &parent))
    }
}

/// Handler for Garmin's `<hr>`: heart rate of the current track point.
pub struct HrHandler;

impl TagHandler for HrHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if !(parent.represents(tags::TRACK_POINT_EXTENSION) && ctx.node_is::<Track>(&parent)) {
            return Ok(skip_element(ctx, &parent));
        }
        let value = read_leaf(ctx)?;
        if let Some(track) = ctx.node_mut::<Track>(&parent) {
            track.set_extended(tags::HEART_RATE, value.into_text());
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Container, GeoDocument};
    use crate::{parse_str, DataFormat, ParseOptions};

    fn parse(body: &str) -> GeoDocument {
        let xml = format!(
            r#"<gpx version="1.1" xmlns="http://www.topografix.com/GPX/1/1"
                    xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">{body}</gpx>"#
        );
        parse_str(DataFormat::Gpx, &xml, ParseOptions::default()).unwrap()
    }

    fn first_placemark(document: &GeoDocument) -> &Placemark {
        document.get::<Placemark>(document.placemarks()[0]).unwrap()
    }

    #[test]
    fn test_waypoint() {
        let document = parse(
            r#"<wpt lat="46.5" lon="7.9"><ele>3970</ele><time>2011-07-03T14:19:57Z</time>
                 <name>Eiger</name><desc>North face</desc></wpt>"#,
        );
        let placemark = first_placemark(&document);

        assert_eq!(placemark.feature.name, "Eiger");
        assert_eq!(placemark.feature.description, "North face");
        assert_eq!(placemark.coordinate, Some(Coordinates::new(7.9, 46.5, 3970.0)));
        let stamp = document.get::<TimeStamp>(placemark.feature.time_stamp.unwrap()).unwrap();
        assert!(stamp.when.is_some());
    }

    #[test]
    fn test_waypoint_without_position() {
        let document = parse(r#"<wpt lat="north"><name>Somewhere</name></wpt>"#);
        let placemark = first_placemark(&document);
        assert_eq!(placemark.feature.name, "Somewhere");
        assert!(placemark.coordinate.is_none());
    }

    #[test]
    fn test_route() {
        let document = parse(
            r#"<rte><name>Pass</name>
                 <rtept lat="46.0" lon="8.0"><ele>2000</ele></rtept>
                 <rtept lat="46.1" lon="8.1"/>
               </rte>"#,
        );
        let placemark = first_placemark(&document);
        let line = document.get::<LineString>(placemark.geometry.unwrap()).unwrap();

        assert_eq!(placemark.feature.name, "Pass");
        assert_eq!(
            line.coordinates,
            vec![Coordinates::new(8.0, 46.0, 2000.0), Coordinates::new(8.1, 46.1, 0.0)]
        );
    }

    #[test]
    fn test_segments_become_tracks() {
        let document = parse(
            r#"<trk><trkseg><trkpt lat="1" lon="2"/></trkseg>
                    <trkseg><trkpt lat="3" lon="4"/><trkpt lat="5" lon="6"/></trkseg></trk>"#,
        );
        let placemark = first_placemark(&document);
        let multi = document.get::<MultiGeometry>(placemark.geometry.unwrap()).unwrap();

        assert_eq!(multi.geometries.len(), 2);
        let second = document.get::<Track>(multi.geometries[1]).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second.when, vec![None, None]);
    }

    #[test]
    fn test_file_and_metadata_time_are_ignored() {
        let document = parse(
            "<time>2011-07-03T14:19:57Z</time><metadata><time>2011-10-29T15:29:19Z</time></metadata>",
        );
        let root = document.get::<Container>(document.root()).unwrap();
        assert!(root.feature.time_stamp.is_none());
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn test_heart_rate_outside_extension_is_ignored() {
        let document = parse(
            r#"<trk><trkseg><trkpt lat="1" lon="2"><gpxtpx:hr>99</gpxtpx:hr></trkpt></trkseg></trk>"#,
        );
        let track = document
            .iter()
            .find_map(|(_, node)| node.get::<Track>())
            .unwrap();
        assert!(track.extended.is_empty());
    }

    #[test]
    fn test_repeated_heart_rate_keeps_points_aligned() {
        let document = parse(
            r#"<trk><trkseg>
                 <trkpt lat="1" lon="2"><extensions><gpxtpx:TrackPointExtension>
                   <gpxtpx:hr>98</gpxtpx:hr><gpxtpx:hr>99</gpxtpx:hr>
                 </gpxtpx:TrackPointExtension></extensions></trkpt>
                 <trkpt lat="3" lon="4"/>
                 <trkpt lat="5" lon="6"><extensions><gpxtpx:TrackPointExtension>
                   <gpxtpx:hr>101</gpxtpx:hr>
                 </gpxtpx:TrackPointExtension></extensions></trkpt>
               </trkseg></trk>"#,
        );
        let track = document
            .iter()
            .find_map(|(_, node)| node.get::<Track>())
            .unwrap();

        assert_eq!(track.len(), 3);
        assert_eq!(track.extended["heartrate"], vec!["99", "", "101"]);
    }

    #[test]
    fn test_track_point_outside_segment_is_ignored() {
        let document = parse(r#"<trk><trkpt lat="1" lon="2"/></trk>"#);
        assert!(!document.iter().any(|(_, node)| node.is::<Track>()));
    }
}
