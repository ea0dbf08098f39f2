//! KML: the geodata dialect of Google Earth and the OGC.
//!
//! Every KML tag is registered under all four historical namespace
//! spellings; the `gx` extension tags live in their own namespace.

pub mod handlers;
pub mod tags;

use crate::format::FormatDescriptor;
use crate::model::GeoDocument;
use crate::registry::HandlerRegistry;

use handlers::*;

pub const KML_NAMESPACE_20: &str = "http://earth.google.com/kml/2.0";
pub const KML_NAMESPACE_21: &str = "http://earth.google.com/kml/2.1";
pub const KML_NAMESPACE_22: &str = "http://earth.google.com/kml/2.2";
pub const KML_NAMESPACE_OGC_22: &str = "http://www.opengis.net/kml/2.2";
/// Google extensions (`gx:`).
pub const GX_NAMESPACE_22: &str = "http://www.google.com/kml/ext/2.2";

/// Namespaces a KML document may be written in.
pub const KML_NAMESPACES: &[&str] = &[
    KML_NAMESPACE_20,
    KML_NAMESPACE_21,
    KML_NAMESPACE_22,
    KML_NAMESPACE_OGC_22,
];

pub static KML_FORMAT: FormatDescriptor = FormatDescriptor::new(
    "KML",
    &[tags::KML],
    KML_NAMESPACES,
    GeoDocument::new_data_document,
);

/// Build the registry of all KML handlers.
#[must_use]
pub fn create_kml_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let kml = KML_NAMESPACES;

    // Features
    registry.register_all(tags::KML, kml, KmlHandler);
    registry.register_all(tags::DOCUMENT, kml, DocumentHandler);
    registry.register_all(tags::FOLDER, kml, FolderHandler);
    registry.register_all(tags::PLACEMARK, kml, PlacemarkHandler);
    registry.register_all(tags::GROUND_OVERLAY, kml, GroundOverlayHandler);
    registry.register_all(tags::NAME, kml, NameHandler);
    registry.register_all(tags::DESCRIPTION, kml, DescriptionHandler);
    registry.register_all(tags::ADDRESS, kml, AddressHandler);
    registry.register_all(tags::PHONE_NUMBER, kml, PhoneNumberHandler);
    registry.register_all(tags::VISIBILITY, kml, VisibilityHandler);
    registry.register_all(tags::OPEN, kml, OpenHandler);
    registry.register_all(tags::STYLE_URL, kml, StyleUrlHandler);

    // Geometry
    registry.register_all(tags::POINT, kml, PointHandler);
    registry.register_all(tags::LINE_STRING, kml, LineStringHandler);
    registry.register_all(tags::LINEAR_RING, kml, LinearRingHandler);
    registry.register_all(tags::POLYGON, kml, PolygonHandler);
    registry.register_all(tags::OUTER_BOUNDARY_IS, kml, BoundaryHandler);
    registry.register_all(tags::INNER_BOUNDARY_IS, kml, BoundaryHandler);
    registry.register_all(tags::MULTI_GEOMETRY, kml, MultiGeometryHandler);
    registry.register(tags::TRACK, GX_NAMESPACE_22, TrackHandler);
    registry.register(tags::LAT_LON_QUAD, GX_NAMESPACE_22, LatLonQuadHandler);
    registry.register_all(tags::COORDINATES, kml, CoordinatesHandler);
    registry.register(tags::COORD, GX_NAMESPACE_22, CoordinatesHandler);
    registry.register_all(tags::ALTITUDE_MODE, kml, AltitudeModeHandler);
    registry.register(tags::ALTITUDE_MODE, GX_NAMESPACE_22, AltitudeModeHandler);
    registry.register_all(tags::EXTRUDE, kml, ExtrudeHandler);
    registry.register_all(tags::TESSELLATE, kml, TessellateHandler);

    // Styles
    registry.register_all(tags::STYLE, kml, StyleHandler);
    registry.register_all(tags::STYLE_MAP, kml, StyleMapHandler);
    registry.register_all(tags::PAIR, kml, PairHandler);
    registry.register_all(tags::KEY, kml, KeyHandler);
    registry.register_all(tags::ICON_STYLE, kml, IconStyleHandler);
    registry.register_all(tags::LINE_STYLE, kml, LineStyleHandler);
    registry.register_all(tags::POLY_STYLE, kml, PolyStyleHandler);
    registry.register_all(tags::LABEL_STYLE, kml, LabelStyleHandler);
    registry.register_all(tags::COLOR, kml, ColorHandler);
    registry.register_all(tags::COLOR_MODE, kml, ColorModeHandler);
    registry.register_all(tags::WIDTH, kml, WidthHandler);
    registry.register_all(tags::SCALE, kml, ScaleHandler);
    registry.register_all(tags::HEADING, kml, HeadingHandler);
    registry.register_all(tags::FILL, kml, FillHandler);
    registry.register_all(tags::OUTLINE, kml, OutlineHandler);
    registry.register_all(tags::ICON, kml, IconHandler);
    registry.register_all(tags::HREF, kml, HrefHandler);

    // Overlays
    registry.register_all(tags::DRAW_ORDER, kml, DrawOrderHandler);
    registry.register_all(tags::LAT_LON_BOX, kml, LatLonBoxHandler);
    registry.register_all(tags::NORTH, kml, EdgeHandler(Edge::North));
    registry.register_all(tags::SOUTH, kml, EdgeHandler(Edge::South));
    registry.register_all(tags::EAST, kml, EdgeHandler(Edge::East));
    registry.register_all(tags::WEST, kml, EdgeHandler(Edge::West));
    registry.register_all(tags::ROTATION, kml, RotationHandler);

    // Views
    registry.register_all(tags::LOOK_AT, kml, LookAtHandler);
    registry.register_all(tags::LONGITUDE, kml, LongitudeHandler);
    registry.register_all(tags::LATITUDE, kml, LatitudeHandler);
    registry.register_all(tags::ALTITUDE, kml, AltitudeHandler);
    registry.register_all(tags::TILT, kml, TiltHandler);
    registry.register_all(tags::RANGE, kml, RangeHandler);

    // Regions
    registry.register_all(tags::REGION, kml, RegionHandler);
    registry.register_all(tags::LAT_LON_ALT_BOX, kml, LatLonAltBoxHandler);
    registry.register_all(tags::MIN_ALTITUDE, kml, MinAltitudeHandler);
    registry.register_all(tags::MAX_ALTITUDE, kml, MaxAltitudeHandler);
    registry.register_all(tags::LOD, kml, LodHandler);
    registry.register_all(tags::MIN_LOD_PIXELS, kml, LodLimitHandler(LodLimit::MinPixels));
    registry.register_all(tags::MAX_LOD_PIXELS, kml, LodLimitHandler(LodLimit::MaxPixels));
    registry.register_all(
        tags::MIN_FADE_EXTENT,
        kml,
        LodLimitHandler(LodLimit::MinFadeExtent),
    );
    registry.register_all(
        tags::MAX_FADE_EXTENT,
        kml,
        LodLimitHandler(LodLimit::MaxFadeExtent),
    );

    // Time
    registry.register_all(tags::TIME_STAMP, kml, TimeStampHandler);
    registry.register_all(tags::WHEN, kml, WhenHandler);
    registry.register_all(tags::TIME_SPAN, kml, TimeSpanHandler);
    registry.register_all(tags::BEGIN, kml, BeginHandler);
    registry.register_all(tags::END, kml, EndHandler);

    // Extended data
    registry.register_all(tags::EXTENDED_DATA, kml, ExtendedDataHandler);
    registry.register_all(tags::DATA, kml, DataHandler);
    registry.register_all(tags::VALUE, kml, ValueHandler);
    registry.register_all(tags::DISPLAY_NAME, kml, DisplayNameHandler);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoParseError;
    use crate::registry::QualifiedName;
    use crate::{parse_str, DataFormat, ParseOptions};

    #[test]
    fn test_registry_covers_every_namespace() {
        let registry = create_kml_registry();
        for namespace in KML_NAMESPACES {
            assert!(registry.contains(&QualifiedName::new(tags::PLACEMARK, *namespace)));
            assert!(registry.contains(&QualifiedName::new(tags::COORDINATES, *namespace)));
        }
    }

    #[test]
    fn test_gx_tags_only_in_extension_namespace() {
        let registry = create_kml_registry();
        assert!(registry.contains(&QualifiedName::new(tags::TRACK, GX_NAMESPACE_22)));
        assert!(!registry.contains(&QualifiedName::new(tags::TRACK, KML_NAMESPACE_OGC_22)));
        assert!(registry.contains(&QualifiedName::new(tags::ALTITUDE_MODE, GX_NAMESPACE_22)));
        assert!(registry.contains(&QualifiedName::new(tags::ALTITUDE_MODE, KML_NAMESPACE_21)));
    }

    #[test]
    fn test_root_validation() {
        assert!(KML_FORMAT.is_valid_root("kml", KML_NAMESPACE_20));
        assert!(!KML_FORMAT.is_valid_root("kml", GX_NAMESPACE_22));
        assert!(!KML_FORMAT.is_valid_root("Document", KML_NAMESPACE_22));
    }

    #[test]
    fn test_kml_without_namespace_is_rejected() {
        let result = parse_str(DataFormat::Kml, "<kml><Document/></kml>", ParseOptions::default());
        assert!(matches!(
            result,
            Err(GeoParseError::InvalidRoot { format: "KML", .. })
        ));
    }

    #[test]
    fn test_elements_from_other_namespaces_are_opaque() {
        let document = parse_str(
            DataFormat::Kml,
            r#"<kml xmlns="http://www.opengis.net/kml/2.2" xmlns:atom="http://www.w3.org/2005/Atom">
                 <Document><atom:author><atom:name>Jane</atom:name></atom:author><name>Doc</name></Document>
               </kml>"#,
            ParseOptions::default(),
        )
        .unwrap();
        let root = document.node(document.root()).and_then(|node| node.as_feature()).unwrap();
        assert_eq!(root.name, "Doc");
    }
}
