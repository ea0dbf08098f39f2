//! GPX: GPS exchange format, versions 1.0 and 1.1.

pub mod handlers;
pub mod tags;

use crate::format::FormatDescriptor;
use crate::model::GeoDocument;
use crate::registry::HandlerRegistry;

use handlers::*;

pub const GPX_NAMESPACE_10: &str = "http://www.topografix.com/GPX/1/0";
pub const GPX_NAMESPACE_11: &str = "http://www.topografix.com/GPX/1/1";
/// Garmin's track point extension carrying heart rate and similar values.
pub const GARMIN_TRACK_POINT_EXTENSION_V1: &str =
    "http://www.garmin.com/xmlschemas/TrackPointExtension/v1";

pub const GPX_NAMESPACES: &[&str] = &[GPX_NAMESPACE_10, GPX_NAMESPACE_11];

pub static GPX_FORMAT: FormatDescriptor = FormatDescriptor::new(
    "GPX",
    &[tags::GPX],
    GPX_NAMESPACES,
    GeoDocument::new_data_document,
);

/// Build the registry of all GPX handlers.
#[must_use]
pub fn create_gpx_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    let gpx = GPX_NAMESPACES;

    registry.register_all(tags::GPX, gpx, GpxHandler);
    registry.register_all(tags::WPT, gpx, WptHandler);
    registry.register_all(tags::RTE, gpx, RteHandler);
    registry.register_all(tags::RTEPT, gpx, RteptHandler);
    registry.register_all(tags::TRK, gpx, TrkHandler);
    registry.register_all(tags::TRKSEG, gpx, TrksegHandler);
    registry.register_all(tags::TRKPT, gpx, TrkptHandler);
    registry.register_all(tags::NAME, gpx, NameHandler);
    registry.register_all(tags::DESC, gpx, DescHandler);
    registry.register_all(tags::ELE, gpx, EleHandler);
    registry.register_all(tags::TIME, gpx, TimeHandler);
    registry.register_all(tags::EXTENSIONS, gpx, ExtensionsHandler);

    registry.register(
        tags::TRACK_POINT_EXTENSION,
        GARMIN_TRACK_POINT_EXTENSION_V1,
        TrackPointExtensionHandler,
    );
    registry.register(tags::HR, GARMIN_TRACK_POINT_EXTENSION_V1, HrHandler);

    registry
}
