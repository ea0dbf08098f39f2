//! KML element names.

pub const KML: &str = "kml";

// Features
pub const DOCUMENT: &str = "Document";
pub const FOLDER: &str = "Folder";
pub const PLACEMARK: &str = "Placemark";
pub const GROUND_OVERLAY: &str = "GroundOverlay";
pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const ADDRESS: &str = "address";
pub const PHONE_NUMBER: &str = "phoneNumber";
pub const VISIBILITY: &str = "visibility";
pub const OPEN: &str = "open";
pub const STYLE_URL: &str = "styleUrl";

// Geometry
pub const POINT: &str = "Point";
pub const LINE_STRING: &str = "LineString";
pub const LINEAR_RING: &str = "LinearRing";
pub const POLYGON: &str = "Polygon";
pub const OUTER_BOUNDARY_IS: &str = "outerBoundaryIs";
pub const INNER_BOUNDARY_IS: &str = "innerBoundaryIs";
pub const MULTI_GEOMETRY: &str = "MultiGeometry";
pub const TRACK: &str = "Track";
pub const LAT_LON_QUAD: &str = "LatLonQuad";
pub const COORDINATES: &str = "coordinates";
pub const COORD: &str = "coord";
pub const ALTITUDE_MODE: &str = "altitudeMode";
pub const EXTRUDE: &str = "extrude";
pub const TESSELLATE: &str = "tessellate";

// Styles
pub const STYLE: &str = "Style";
pub const STYLE_MAP: &str = "StyleMap";
pub const PAIR: &str = "Pair";
pub const KEY: &str = "key";
pub const ICON_STYLE: &str = "IconStyle";
pub const LINE_STYLE: &str = "LineStyle";
pub const POLY_STYLE: &str = "PolyStyle";
pub const LABEL_STYLE: &str = "LabelStyle";
pub const COLOR: &str = "color";
pub const COLOR_MODE: &str = "colorMode";
pub const WIDTH: &str = "width";
pub const SCALE: &str = "scale";
pub const HEADING: &str = "heading";
pub const FILL: &str = "fill";
pub const OUTLINE: &str = "outline";
pub const ICON: &str = "Icon";
pub const HREF: &str = "href";

// Overlays
pub const DRAW_ORDER: &str = "drawOrder";
pub const LAT_LON_BOX: &str = "LatLonBox";
pub const NORTH: &str = "north";
pub const SOUTH: &str = "south";
pub const EAST: &str = "east";
pub const WEST: &str = "west";
pub const ROTATION: &str = "rotation";

// Views
pub const LOOK_AT: &str = "LookAt";
pub const LONGITUDE: &str = "longitude";
pub const LATITUDE: &str = "latitude";
pub const ALTITUDE: &str = "altitude";
pub const TILT: &str = "tilt";
pub const RANGE: &str = "range";

// Regions
pub const REGION: &str = "Region";
pub const LAT_LON_ALT_BOX: &str = "LatLonAltBox";
pub const MIN_ALTITUDE: &str = "minAltitude";
pub const MAX_ALTITUDE: &str = "maxAltitude";
pub const LOD: &str = "Lod";
pub const MIN_LOD_PIXELS: &str = "minLodPixels";
pub const MAX_LOD_PIXELS: &str = "maxLodPixels";
pub const MIN_FADE_EXTENT: &str = "minFadeExtent";
pub const MAX_FADE_EXTENT: &str = "maxFadeExtent";

// Time
pub const TIME_STAMP: &str = "TimeStamp";
pub const WHEN: &str = "when";
pub const TIME_SPAN: &str = "TimeSpan";
pub const BEGIN: &str = "begin";
pub const END: &str = "end";

// Extended data
pub const EXTENDED_DATA: &str = "ExtendedData";
pub const DATA: &str = "Data";
pub const VALUE: &str = "value";
pub const DISPLAY_NAME: &str = "displayName";
