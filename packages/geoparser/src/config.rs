//! Parser configuration and data format selection.

use std::path::Path;

use crate::error::{GeoParseError, Result};
use crate::format::FormatDescriptor;
use crate::registry::HandlerRegistry;
use crate::{dgml, gpx, kml};

/// Options that influence how individual handlers interpret values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Split coordinate tuples exactly as written.
    ///
    /// When false (the default), whitespace around the commas of a tuple
    /// such as `1.0 , 2.0` is tolerated.
    pub strict_coordinates: bool,
}

impl ParseOptions {
    /// Create the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict coordinate tuple splitting.
    #[must_use]
    pub fn with_strict_coordinates(mut self, strict: bool) -> Self {
        self.strict_coordinates = strict;
        self
    }
}

/// Supported input dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DataFormat {
    /// Keyhole Markup Language.
    Kml,
    /// GPS Exchange Format.
    Gpx,
    /// Marble map theme description.
    Dgml,
}

impl DataFormat {
    /// All supported formats.
    pub const ALL: [DataFormat; 3] = [DataFormat::Kml, DataFormat::Gpx, DataFormat::Dgml];

    /// Short lowercase name, matching the file extension.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kml => "kml",
            Self::Gpx => "gpx",
            Self::Dgml => "dgml",
        }
    }

    /// Parse a format name or file extension (case-insensitive).
    ///
    /// # Examples
    /// ```
    /// use marble_geoparser::config::DataFormat;
    ///
    /// assert_eq!(DataFormat::from_name("KML").unwrap(), DataFormat::Kml);
    /// assert!(DataFormat::from_name("shp").is_err());
    /// ```
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "kml" => Ok(Self::Kml),
            "gpx" => Ok(Self::Gpx),
            "dgml" => Ok(Self::Dgml),
            _ => Err(GeoParseError::UnknownFormat(name.to_string())),
        }
    }

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| GeoParseError::UnknownFormat(path.display().to_string()))?;
        Self::from_name(extension)
    }

    /// Root validation and initial document for this format.
    #[must_use]
    pub fn descriptor(&self) -> &'static FormatDescriptor {
        match self {
            Self::Kml => &kml::KML_FORMAT,
            Self::Gpx => &gpx::GPX_FORMAT,
            Self::Dgml => &dgml::DGML_FORMAT,
        }
    }

    /// Build the handler registry for this format.
    #[must_use]
    pub fn registry(&self) -> HandlerRegistry {
        match self {
            Self::Kml => kml::create_kml_registry(),
            Self::Gpx => gpx::create_gpx_registry(),
            Self::Dgml => dgml::create_dgml_registry(),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
