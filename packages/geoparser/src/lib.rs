//! Marble GeoParser - tag-dispatch parsing of KML, GPX and DGML documents.
//!
//! Every element of a document is handed to the handler registered for its
//! qualified name (local tag plus namespace URI). Handlers see the chain of
//! open ancestors and attach what they build to the nodes of a typed
//! [`GeoDocument`]. Unknown tags are tolerated, tags in the wrong context
//! are skipped and malformed values fall back to defaults; only malformed
//! markup, an unacceptable root and unclosed tags fail a parse.
//!
//! # Example
//!
//! ```
//! use marble_geoparser::model::Placemark;
//! use marble_geoparser::{parse_str, DataFormat, ParseOptions};
//!
//! let gpx = r#"<gpx xmlns="http://www.topografix.com/GPX/1/1">
//!   <wpt lat="46.55" lon="7.98"><name>Jungfraujoch</name></wpt>
//! </gpx>"#;
//! let document = parse_str(DataFormat::Gpx, gpx, ParseOptions::default()).unwrap();
//! let placemark = document.get::<Placemark>(document.placemarks()[0]).unwrap();
//! assert_eq!(placemark.feature.name, "Jungfraujoch");
//! ```
//!
//! # Architecture
//!
//! - [`registry`]: qualified names, handler registry, parse stack and the
//!   dispatch engine
//! - [`xml`]: the token source capability and its quick-xml implementation
//! - [`model`]: the node arena documents are built into
//! - [`format`]: format descriptors and one-shot parse helpers
//! - [`kml`], [`gpx`], [`dgml`]: tag dictionaries, handlers and registry
//!   builders per dialect
//! - [`config`]: parse options and format selection
//! - [`values`]: leaf value parsing
//! - [`error`]: error types and Result alias
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod dgml;
pub mod error;
pub mod format;
pub mod gpx;
pub mod kml;
pub mod model;
pub mod registry;
pub mod values;
pub mod xml;

// Re-export commonly used items
pub use config::{DataFormat, ParseOptions};
pub use error::{GeoParseError, Result};
pub use format::{parse_reader, parse_str, FormatDescriptor};
pub use model::{GeoDocument, GeoNode, NodeId};
pub use registry::{GeoParser, HandlerRegistry, QualifiedName, SharedRegistry, TagHandler};
