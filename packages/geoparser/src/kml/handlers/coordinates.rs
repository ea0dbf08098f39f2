//! Handler for `<coordinates>` and `<gx:coord>`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::kml::tags;
use crate::model::{
    Coordinates, GeoNode, LatLonQuad, LineString, MultiGeometry, NodeId, Placemark, Point, Track,
};
use crate::registry::{read_leaf, skip_element, ParseContext, TagHandler};
use crate::values::parse_f64;

/// Whitespace around the commas of a tuple, tolerated unless strict.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COMMA_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid regex"));

/// Number of corners of a `gx:LatLonQuad`.
const QUAD_CORNERS: usize = 4;

/// Parse one `lon,lat[,alt]` tuple.
fn parse_tuple(tuple: &str) -> Option<Coordinates> {
    let mut parts = tuple.split(',');
    let longitude = parse_f64(parts.next()?)?;
    let latitude = parse_f64(parts.next()?)?;
    let altitude = match parts.next() {
        Some(altitude) => parse_f64(altitude)?,
        None => 0.0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Coordinates::new(longitude, latitude, altitude))
}

/// Split coordinates text into parsed tuples, skipping malformed ones.
fn parse_tuples(text: &str, strict: bool, line: u64) -> Vec<Coordinates> {
    let text = if strict {
        text.to_string()
    } else {
        COMMA_SPACING.replace_all(text, ",").into_owned()
    };

    text.split_whitespace()
        .filter_map(|tuple| {
            let parsed = parse_tuple(tuple);
            if parsed.is_none() {
                tracing::debug!(tuple, line, "Skipping malformed coordinate tuple");
            }
            parsed
        })
        .collect()
}

/// Parse a `gx:coord` value: one space separated `lon lat [alt]` triple.
fn parse_track_coord(text: &str, strict: bool) -> Option<Coordinates> {
    let text = if strict {
        text.to_string()
    } else {
        COMMA_SPACING.replace_all(text, ",").into_owned()
    };
    let values: Vec<f64> = text
        .split_whitespace()
        .map(parse_f64)
        .collect::<Option<_>>()?;

    match values.as_slice() {
        [longitude, latitude] => Some(Coordinates::new(*longitude, *latitude, 0.0)),
        [longitude, latitude, altitude] => Some(Coordinates::new(*longitude, *latitude, *altitude)),
        _ => None,
    }
}

/// Handler for `<coordinates>` (and `<gx:coord>` inside a track).
///
/// Coordinates below a pass-through `<Point>` move the placemark. Below a
/// multi-geometry every tuple becomes a point of its own, below a
/// `gx:LatLonQuad` the first four tuples are the corners.
pub struct CoordinatesHandler;

impl TagHandler for CoordinatesHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        let strict = ctx.options().strict_coordinates;

        if parent.represents(tags::TRACK) {
            let value = read_leaf(ctx)?;
            let Some(coordinates) = parse_track_coord(value.text(), strict) else {
                value.warn_invalid("a track coordinate");
                return Ok(None);
            };
            if let Some(track) = ctx.node_mut::<Track>(&parent) {
                track.coordinates.push(coordinates);
            }
            return Ok(None);
        }

        let Some(target) = parent.node else {
            return Ok(skip_element(ctx, &parent));
        };
        let fits = [
            tags::POINT,
            tags::LINE_STRING,
            tags::LINEAR_RING,
            tags::MULTI_GEOMETRY,
            tags::LAT_LON_QUAD,
        ]
        .iter()
        .any(|tag| parent.represents(tag));
        if !fits {
            return Ok(skip_element(ctx, &parent));
        }

        let line = ctx.line_number();
        let value = read_leaf(ctx)?;
        let tuples = parse_tuples(value.text(), strict, line);

        if parent.represents(tags::POINT) {
            // The placemark itself when <Point> passed it through.
            let Some(last) = tuples.last().copied() else {
                return Ok(None);
            };
            if ctx.node_is::<Placemark>(&parent) {
                ctx.document_mut().set_placemark_coordinate(target, last);
            } else if let Some(point) = ctx.node_mut::<Point>(&parent) {
                point.coordinates = Some(last);
            }
        } else if let Some(line_string) = ctx.node_mut::<LineString>(&parent) {
            line_string.coordinates.extend(tuples);
        } else if ctx.node_is::<MultiGeometry>(&parent) {
            for coordinates in tuples {
                let point = ctx.add_node(GeoNode::Point(Point {
                    coordinates: Some(coordinates),
                    ..Point::default()
                }));
                if let Some(multi) = ctx.node_mut::<MultiGeometry>(&parent) {
                    multi.geometries.push(point);
                }
            }
        } else if let Some(quad) = ctx.node_mut::<LatLonQuad>(&parent) {
            if tuples.len() > QUAD_CORNERS {
                tracing::debug!(
                    count = tuples.len(),
                    line,
                    "Ignoring excessive coordinates in LatLonQuad"
                );
            }
            quad.corners = tuples.into_iter().take(QUAD_CORNERS).collect();
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoDocument;
    use crate::{parse_str, DataFormat, ParseOptions};

    const HEADER: &str = r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2">"#;

    fn parse(body: &str, options: ParseOptions) -> GeoDocument {
        let xml = format!("{HEADER}<Document>{body}</Document></kml>");
        parse_str(DataFormat::Kml, &xml, options).unwrap()
    }

    fn first_geometry(document: &GeoDocument) -> NodeId {
        let placemark = document.placemarks()[0];
        document.get::<Placemark>(placemark).unwrap().geometry.unwrap()
    }

    #[test]
    fn test_parse_tuple() {
        assert_eq!(parse_tuple("1.5,2"), Some(Coordinates::new(1.5, 2.0, 0.0)));
        assert_eq!(parse_tuple("1,2,3"), Some(Coordinates::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_tuple("1"), None);
        assert_eq!(parse_tuple("1,2,3,4"), None);
        assert_eq!(parse_tuple("a,b"), None);
    }

    #[test]
    fn test_lenient_comma_spacing() {
        let tuples = parse_tuples("1 , 2,3\n\t4,5 ,6", false, 1);
        assert_eq!(
            tuples,
            vec![Coordinates::new(1.0, 2.0, 3.0), Coordinates::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn test_strict_comma_spacing_skips_split_tuples() {
        let tuples = parse_tuples("1 , 2,3 4,5,6", true, 1);
        assert_eq!(
            tuples,
            vec![Coordinates::new(2.0, 3.0, 0.0), Coordinates::new(4.0, 5.0, 6.0)]
        );
    }

    #[test]
    fn test_point_sets_placemark_coordinate() {
        let document = parse(
            "<Placemark><Point><coordinates>1,2</coordinates></Point></Placemark>",
            ParseOptions::default(),
        );
        let placemark = document.get::<Placemark>(document.placemarks()[0]).unwrap();

        assert_eq!(placemark.coordinate, Some(Coordinates::new(1.0, 2.0, 0.0)));
        let point = document.get::<Point>(first_geometry(&document)).unwrap();
        assert_eq!(point.coordinates, placemark.coordinate);
        // Root, placemark and its point: no orphaned node.
        assert_eq!(document.len(), 3);
    }

    #[test]
    fn test_multi_geometry_coordinates_become_points() {
        let document = parse(
            "<Placemark><MultiGeometry><coordinates>1,2 3,4 5,6</coordinates></MultiGeometry></Placemark>",
            ParseOptions::default(),
        );
        let multi = document.get::<MultiGeometry>(first_geometry(&document)).unwrap();
        assert_eq!(multi.geometries.len(), 3);
    }

    #[test]
    fn test_lat_lon_quad_keeps_four_corners() {
        let document = parse(
            "<GroundOverlay><gx:LatLonQuad><coordinates>0,0 1,0 1,1 0,1 9,9</coordinates></gx:LatLonQuad></GroundOverlay>",
            ParseOptions::default(),
        );
        let (_, quad) = document
            .iter()
            .find_map(|(id, node)| node.get::<LatLonQuad>().map(|quad| (id, quad)))
            .unwrap();
        assert_eq!(quad.corners.len(), 4);
        assert_eq!(quad.corners[2], Coordinates::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_track_coords_and_when() {
        let document = parse(
            "<Placemark><gx:Track>\
             <when>2010-05-28T02:02:09Z</when><when>2010-05-28T02:02:35Z</when>\
             <gx:coord>-122.207881 37.371915 156.0</gx:coord>\
             <gx:coord>-122.205712 37.373288 152.0</gx:coord>\
             <gx:coord>broken</gx:coord>\
             </gx:Track></Placemark>",
            ParseOptions::default(),
        );
        let track = document.get::<Track>(first_geometry(&document)).unwrap();

        assert_eq!(track.len(), 2);
        assert_eq!(track.when.len(), 2);
        assert_eq!(track.coordinates[1].altitude, 152.0);
    }

    #[test]
    fn test_coordinates_in_wrong_context_are_ignored() {
        let document = parse(
            "<Placemark><coordinates>1,2</coordinates></Placemark>",
            ParseOptions::default(),
        );
        let placemark = document.get::<Placemark>(document.placemarks()[0]).unwrap();
        assert!(placemark.geometry.is_none());
        assert!(placemark.coordinate.is_none());
    }
}
