//! Handlers for time primitives.

use crate::error::Result;
use crate::model::{Feature, GeoNode, NodeId, TimeSpan, TimeStamp, Track};
use crate::registry::{apply_to_parent, read_leaf, skip_element, ParseContext, TagHandler};

/// Attach a time primitive to the feature of the parent frame.
fn attach_time(
    ctx: &mut ParseContext<'_>,
    node: GeoNode,
    slot: fn(&mut Feature) -> &mut Option<NodeId>,
) -> Option<NodeId> {
    let parent = ctx.parent();
    let is_feature = parent
        .node
        .and_then(|id| ctx.document().node(id))
        .is_some_and(|node| node.as_feature().is_some());
    let Some(feature_id) = parent.node.filter(|_| is_feature) else {
        return skip_element(ctx, &parent);
    };

    let id = ctx.add_node(node);
    if let Some(feature) = ctx
        .document_mut()
        .node_mut(feature_id)
        .and_then(GeoNode::as_feature_mut)
    {
        *slot(feature) = Some(id);
    }
    Some(id)
}

/// Handler for `<TimeStamp>`.
pub struct TimeStampHandler;

impl TagHandler for TimeStampHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_time(
            ctx,
            GeoNode::TimeStamp(TimeStamp::default()),
            |feature| &mut feature.time_stamp,
        ))
    }
}

/// Handler for `<TimeSpan>`.
pub struct TimeSpanHandler;

impl TagHandler for TimeSpanHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        Ok(attach_time(
            ctx,
            GeoNode::TimeSpan(TimeSpan::default()),
            |feature| &mut feature.time_span,
        ))
    }
}

/// Handler for `<when>` of a time stamp or a `gx:Track`.
///
/// A track keeps one entry per `<when>`, with `None` for unparseable
/// values, so that timestamps stay aligned with the coordinates.
pub struct WhenHandler;

impl TagHandler for WhenHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        let parent = ctx.parent();
        if ctx.node_is::<Track>(&parent) {
            let when = read_leaf(ctx)?.datetime();
            if let Some(track) = ctx.node_mut::<Track>(&parent) {
                track.when.push(when);
            }
            return Ok(None);
        }
        apply_to_parent(ctx, GeoNode::get_mut::<TimeStamp>, |stamp, value| {
            stamp.when = value.datetime();
        })
    }
}

/// Handler for `<begin>`.
pub struct BeginHandler;

impl TagHandler for BeginHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<TimeSpan>, |span, value| {
            span.begin = value.datetime();
        })
    }
}

/// Handler for `<end>`.
pub struct EndHandler;

impl TagHandler for EndHandler {
    fn parse(&self, ctx: &mut ParseContext<'_>) -> Result<Option<NodeId>> {
        apply_to_parent(ctx, GeoNode::get_mut::<TimeSpan>, |span, value| {
            span.end = value.datetime();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoDocument, Placemark};
    use crate::{parse_str, DataFormat, ParseOptions};
    use chrono::{TimeZone, Utc};

    fn first_placemark(body: &str) -> (GeoDocument, Placemark) {
        let xml = format!(
            r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:gx="http://www.google.com/kml/ext/2.2"><Placemark>{body}</Placemark></kml>"#
        );
        let document = parse_str(DataFormat::Kml, &xml, ParseOptions::default()).unwrap();
        let placemark = document.get::<Placemark>(document.placemarks()[0]).unwrap().clone();
        (document, placemark)
    }

    #[test]
    fn test_time_stamp() {
        let (document, placemark) =
            first_placemark("<TimeStamp><when>1997-07-16T07:30:15Z</when></TimeStamp>");
        let stamp = document.get::<TimeStamp>(placemark.feature.time_stamp.unwrap()).unwrap();
        assert_eq!(
            stamp.when,
            Some(Utc.with_ymd_and_hms(1997, 7, 16, 7, 30, 15).unwrap())
        );
    }

    #[test]
    fn test_time_span_with_partial_dates() {
        let (document, placemark) =
            first_placemark("<TimeSpan><begin>2000-03</begin><end>2001</end></TimeSpan>");
        let span = document.get::<TimeSpan>(placemark.feature.time_span.unwrap()).unwrap();
        assert_eq!(span.begin, Some(Utc.with_ymd_and_hms(2000, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(span.end, Some(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_invalid_track_when_keeps_alignment() {
        let (document, placemark) = first_placemark(
            "<gx:Track><when>2020-01-01T00:00:00Z</when><when>soon</when></gx:Track>",
        );
        let track = document.get::<Track>(placemark.geometry.unwrap()).unwrap();
        assert_eq!(track.when.len(), 2);
        assert!(track.when[0].is_some());
        assert!(track.when[1].is_none());
    }

    #[test]
    fn test_when_outside_time_stamp_is_ignored() {
        let (document, placemark) = first_placemark("<when>2020-01-01</when>");
        assert!(placemark.feature.time_stamp.is_none());
        assert_eq!(document.len(), 2);
    }
}
