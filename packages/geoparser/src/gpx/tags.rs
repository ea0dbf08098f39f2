//! GPX element and attribute names.

pub const GPX: &str = "gpx";
pub const METADATA: &str = "metadata";
pub const WPT: &str = "wpt";
pub const RTE: &str = "rte";
pub const RTEPT: &str = "rtept";
pub const TRK: &str = "trk";
pub const TRKSEG: &str = "trkseg";
pub const TRKPT: &str = "trkpt";
pub const NAME: &str = "name";
pub const DESC: &str = "desc";
pub const ELE: &str = "ele";
pub const TIME: &str = "time";
pub const EXTENSIONS: &str = "extensions";

// Garmin TrackPointExtension
pub const TRACK_POINT_EXTENSION: &str = "TrackPointExtension";
pub const HR: &str = "hr";

pub const ATTR_LAT: &str = "lat";
pub const ATTR_LON: &str = "lon";

/// Name of the per-point array heart rates are collected in.
pub const HEART_RATE: &str = "heartrate";
