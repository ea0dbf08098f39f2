//! Format descriptors and one-shot parse helpers.

use std::io::Read;
use std::sync::Arc;

use crate::config::{DataFormat, ParseOptions};
use crate::error::Result;
use crate::model::GeoDocument;
use crate::registry::GeoParser;

/// What distinguishes one dialect from another at the document level: the
/// accepted roots and the document created before parsing starts.
#[derive(Debug)]
pub struct FormatDescriptor {
    /// Display name used in errors (`KML`).
    pub name: &'static str,
    /// Accepted local names of the outermost element.
    pub root_tags: &'static [&'static str],
    /// Accepted namespaces of the outermost element.
    pub namespaces: &'static [&'static str],
    create_document: fn() -> GeoDocument,
}

impl FormatDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        root_tags: &'static [&'static str],
        namespaces: &'static [&'static str],
        create_document: fn() -> GeoDocument,
    ) -> Self {
        Self {
            name,
            root_tags,
            namespaces,
            create_document,
        }
    }

    /// Whether an element may start a document of this format.
    #[must_use]
    pub fn is_valid_root(&self, local_name: &str, namespace_uri: &str) -> bool {
        self.root_tags.contains(&local_name) && self.namespaces.contains(&namespace_uri)
    }

    /// Fresh, empty document for one parse.
    #[must_use]
    pub fn new_document(&self) -> GeoDocument {
        (self.create_document)()
    }
}

/// Parse a document held in memory.
///
/// # Errors
/// Returns the parse failure if the markup is malformed, the root element
/// does not belong to `format` or tags are left open.
///
/// # Examples
/// ```
/// use marble_geoparser::{parse_str, DataFormat, ParseOptions};
///
/// let kml = r#"<kml xmlns="http://www.opengis.net/kml/2.2">
///   <Placemark><name>Zurich</name></Placemark>
/// </kml>"#;
/// let document = parse_str(DataFormat::Kml, kml, ParseOptions::default()).unwrap();
/// assert_eq!(document.placemarks().len(), 1);
/// ```
pub fn parse_str(format: DataFormat, input: &str, options: ParseOptions) -> Result<GeoDocument> {
    let mut parser = GeoParser::new(format.descriptor(), Arc::new(format.registry()))
        .with_options(options);
    parser.read_str(input)?;
    Ok(parser
        .release_document()
        .unwrap_or_else(|| format.descriptor().new_document()))
}

/// Parse a document from any reader.
///
/// # Errors
/// Returns IO errors of the reader as well as the parse failures of
/// [`parse_str`].
pub fn parse_reader(
    format: DataFormat,
    reader: impl Read,
    options: ParseOptions,
) -> Result<GeoDocument> {
    let mut parser = GeoParser::new(format.descriptor(), Arc::new(format.registry()))
        .with_options(options);
    parser.read(reader)?;
    Ok(parser
        .release_document()
        .unwrap_or_else(|| format.descriptor().new_document()))
}
